use std::sync::Arc;

use pretty_assertions::assert_eq;
use reqwest::Method;
use serde_json::json;
use tilesets_client::transport::FauxTransport;
use tilesets_client::{CreateTileset, TilesetSession, TilesetsError};

const API: &str = "https://tiles.example.com";
const TOKEN: &str = "fake-token";

fn session() -> (TilesetSession, Arc<FauxTransport>) {
    let transport = Arc::new(FauxTransport::default());
    let session = TilesetSession::with_transport(Some(TOKEN), API, transport.clone())
        .expect("explicit token always resolves");
    (session, transport)
}

#[test]
fn create_returns_locally_supplied_fields() {
    let (session, transport) = session();
    // The server body is deliberately different from the local arguments;
    // none of it may leak into the returned entity.
    transport.push(200, r#"{"id": "server.side", "filesize": 999}"#, None);

    let recipe = json!({ "version": 1 });
    let opts = CreateTileset {
        name: "my name".to_string(),
        description: "my description".to_string(),
        private: true,
    };
    let tileset = session.create_tileset("iama.test", &recipe, &opts).unwrap();

    let projection = tileset.to_projection();
    let keys: Vec<&str> = projection.keys().map(String::as_str).collect();
    assert_eq!(keys, ["name", "description"]);
    assert_eq!(projection["name"], json!("my name"));
    assert_eq!(projection["description"], json!("my description"));
    assert_eq!(tileset.recipe, Some(recipe));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(
        requests[0].url,
        format!("{API}/tilesets/v1/iama.test?access_token={TOKEN}")
    );
}

#[test]
fn create_private_flag_is_sent_only_when_true() {
    let (session, transport) = session();
    transport.push(200, "{}", None);
    transport.push(200, "{}", None);

    let recipe = json!({ "version": 1 });
    session
        .create_tileset("iama.test", &recipe, &CreateTileset::default())
        .unwrap();
    session
        .create_tileset(
            "iama.test",
            &recipe,
            &CreateTileset {
                private: false,
                ..CreateTileset::default()
            },
        )
        .unwrap();

    let requests = transport.requests();
    let private_body = requests[0].body.as_ref().unwrap();
    assert_eq!(private_body["private"], json!(true));
    // The false case is omitted, not sent: absence means non-private.
    let public_body = requests[1].body.as_ref().unwrap();
    assert!(public_body.get("private").is_none());
    assert_eq!(public_body["recipe"], json!({ "version": 1 }));
}

#[test]
fn create_failure_carries_raw_body() {
    let (session, transport) = session();
    transport.push(500, "server error", None);

    let err = session
        .create_tileset("iama.test", &json!({}), &CreateTileset::default())
        .unwrap_err();
    assert!(matches!(err, TilesetsError::RemoteApi(_)));
    assert_eq!(err.to_string(), "server error");
}

#[test]
fn validate_recipe_returns_response_verbatim() {
    let (session, transport) = session();
    transport.push(200, r#"{"valid": true, "errors": []}"#, None);

    let result = session.validate_recipe(&json!({ "version": 1 })).unwrap();
    assert_eq!(result, json!({ "valid": true, "errors": [] }));

    let requests = transport.requests();
    assert_eq!(requests[0].method, Method::PUT);
    assert_eq!(
        requests[0].url,
        format!("{API}/tilesets/v1/validateRecipe?access_token={TOKEN}")
    );
    assert_eq!(requests[0].body, Some(json!({ "version": 1 })));
}

#[test]
fn validate_recipe_failure_carries_raw_body() {
    let (session, transport) = session();
    transport.push(422, "unprocessable recipe", None);

    let err = session.validate_recipe(&json!({})).unwrap_err();
    assert_eq!(err.to_string(), "unprocessable recipe");
}

#[test]
fn status_returns_parsed_document() {
    let (session, transport) = session();
    transport.push(200, r#"{"id": "iama.test", "status": "processing"}"#, None);

    let status = session.status("iama.test").unwrap();
    assert_eq!(status["status"], json!("processing"));

    let requests = transport.requests();
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(
        requests[0].url,
        format!("{API}/tilesets/v1/iama.test/status?access_token={TOKEN}")
    );
}

#[test]
fn list_follows_next_links() {
    let (session, transport) = session();
    let next_url = format!("{API}/tilesets/v1/iama?start=abc&limit=100");
    transport.push(
        200,
        r#"[{"id": "iama.one"}, {"id": "iama.two"}]"#,
        Some(&format!("<{next_url}>; rel=\"next\"")),
    );
    transport.push(200, r#"[{"id": "iama.three"}]"#, None);

    let ids: Vec<String> = session
        .list_tilesets("iama")
        .unwrap()
        .map(|tileset| tileset.unwrap().id.unwrap())
        .collect();
    assert_eq!(ids, ["iama.one", "iama.two", "iama.three"]);

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0].url,
        format!("{API}/tilesets/v1/iama?access_token={TOKEN}")
    );
    // The next-link has no token; the session re-appends it.
    assert_eq!(requests[1].url, format!("{next_url}&access_token={TOKEN}"));
}

#[test]
fn list_fetches_one_page_per_advance() {
    let (session, transport) = session();
    transport.push(
        200,
        r#"[{"id": "iama.one"}]"#,
        Some(&format!("<{API}/next>; rel=\"next\"")),
    );

    let mut tilesets = session.list_tilesets("iama").unwrap();
    // Only the first page has been requested so far.
    assert_eq!(transport.requests().len(), 1);
    assert!(tilesets.next().unwrap().is_ok());
    assert_eq!(transport.requests().len(), 1);

    // Crossing the page boundary issues exactly one more call.
    transport.push(200, "[]", None);
    assert!(tilesets.next().is_none());
    assert_eq!(transport.requests().len(), 2);
}

#[test]
fn list_first_page_failure_is_immediate() {
    let (session, transport) = session();
    transport.push(500, "server error", None);

    let err = session.list_tilesets("iama").unwrap_err();
    assert!(matches!(err, TilesetsError::RemoteApi(_)));
    assert_eq!(err.to_string(), "server error");
}

#[test]
fn list_later_page_failure_ends_iteration() {
    let (session, transport) = session();
    transport.push(
        200,
        r#"[{"id": "iama.one"}]"#,
        Some(&format!("<{API}/next>; rel=\"next\"")),
    );
    transport.push(500, "server error", None);

    let mut tilesets = session.list_tilesets("iama").unwrap();
    assert!(tilesets.next().unwrap().is_ok());
    let err = tilesets.next().unwrap().unwrap_err();
    assert_eq!(err.to_string(), "server error");
    assert!(tilesets.next().is_none());
}

#[test]
fn fetch_status_reuses_an_explicit_session() {
    let (session, transport) = session();
    transport.push(
        200,
        r#"[{"id": "iama.test", "status": "queued"}]"#,
        None,
    );
    transport.push(200, r#"{"id": "iama.test", "status": "success"}"#, None);

    let tileset = session
        .list_tilesets("iama")
        .unwrap()
        .next()
        .unwrap()
        .unwrap();
    let status = tileset.fetch_status(Some(&session), None, None).unwrap();
    assert_eq!(status["status"], json!("success"));
    assert_eq!(
        transport.requests()[1].url,
        format!("{API}/tilesets/v1/iama.test/status?access_token={TOKEN}")
    );
}

#[test]
fn fetch_status_requires_an_id() {
    let (session, transport) = session();
    transport.push(200, "{}", None);

    let recipe = json!({ "version": 1 });
    let tileset = session
        .create_tileset("iama.test", &recipe, &CreateTileset::default())
        .unwrap();
    // Created entities reflect local intent only and carry no id.
    let err = tileset.fetch_status(Some(&session), None, None).unwrap_err();
    assert!(matches!(err, TilesetsError::MissingTilesetId));
}
