use rmcp::handler::server::wrapper::Parameters;
use serde_json::{Value, json};
use trcat::mcp::{TrcatMcpServer, types::ExtractCatalogParams};

use crate::{
    McpTestFixture, assert_pagination, extract_tool_result_json, fixture_two_scenes,
};

fn params(fixture: &McpTestFixture) -> ExtractCatalogParams {
    ExtractCatalogParams {
        project_root_path: fixture.root(),
        documents: None,
        markers: None,
        write: None,
        limit: None,
        offset: None,
    }
}

async fn extract(params: ExtractCatalogParams) -> Value {
    let server = TrcatMcpServer::new();
    let result = server.extract_catalog(Parameters(params)).await.unwrap();
    extract_tool_result_json(&result)
}

fn texts(result: &Value) -> Vec<&str> {
    result["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["text"].as_str().unwrap())
        .collect()
}

// ============================================================================
// extraction
// ============================================================================

#[tokio::test]
async fn test_extract_whole_project() {
    let fixture = fixture_two_scenes().unwrap();

    let result = extract(params(&fixture)).await;

    assert_eq!(result["stats"]["documentsScanned"], 2);
    assert_eq!(result["stats"]["stringsExtracted"], 6);
    assert_eq!(result["stats"]["entryCount"], 4);
    assert_eq!(result["stats"]["errorCount"], 0);
    assert_eq!(result["stats"]["complete"], true);
    assert_eq!(result["issues"], json!([]));
    assert_eq!(result["written"], Value::Null);

    assert_eq!(
        texts(&result),
        vec!["Accelerator", "Okay!", "(sigh)", "Goodbye Bones"]
    );

    let sigh = &result["entries"][2];
    assert_eq!(sigh["rank"], 2);
    assert_eq!(sigh["occurrenceCount"], 2);
    assert_eq!(sigh["firstSeen"], "scenes/a_intro.gd:3:1");
    assert_eq!(sigh["key"].as_str().map(str::len), Some(32));

    assert_pagination(&result, 0, 50, false);
}

#[tokio::test]
async fn test_extract_is_stable_across_calls() {
    let fixture = fixture_two_scenes().unwrap();

    let first = extract(params(&fixture)).await;
    let second = extract(params(&fixture)).await;

    assert_eq!(first["stats"]["hash"], second["stats"]["hash"]);
    assert_eq!(first["entries"], second["entries"]);
}

#[tokio::test]
async fn test_extract_selected_documents() {
    let fixture = fixture_two_scenes().unwrap();

    let result = extract(ExtractCatalogParams {
        documents: Some(vec!["scenes/b_ending.gd".to_string()]),
        ..params(&fixture)
    })
    .await;

    assert_eq!(result["stats"]["documentsScanned"], 1);
    assert_eq!(texts(&result), vec!["Okay!", "Goodbye Bones", "(sigh)"]);
    assert_eq!(result["entries"][0]["firstSeen"], "scenes/b_ending.gd:1:1");
}

#[tokio::test]
async fn test_extract_with_markers() {
    let fixture =
        McpTestFixture::with_documents(&[("dialogue.py", "_(\"Real Meal\")\ntr(\"skipped\")\n")])
            .unwrap();

    let result = extract(ExtractCatalogParams {
        markers: Some(vec!["_".to_string()]),
        ..params(&fixture)
    })
    .await;

    assert_eq!(texts(&result), vec!["Real Meal"]);
}

#[tokio::test]
async fn test_extract_rejects_invalid_marker() {
    let fixture = fixture_two_scenes().unwrap();
    let server = TrcatMcpServer::new();

    let result = server
        .extract_catalog(Parameters(ExtractCatalogParams {
            markers: Some(vec!["tr(".to_string()]),
            ..params(&fixture)
        }))
        .await;

    assert!(result.is_err());
}

// ============================================================================
// issues
// ============================================================================

#[tokio::test]
async fn test_extract_reports_issues() {
    let fixture = McpTestFixture::with_documents(&[(
        "scene.gd",
        "tr(\"Okay!\")\nname = tr(\"Table for Five\ntr(line_id)\ntr(\"okay\")\n",
    )])
    .unwrap();

    let result = extract(params(&fixture)).await;

    assert_eq!(result["stats"]["errorCount"], 1);
    assert_eq!(result["stats"]["warningCount"], 2);

    let rules: Vec<&str> = result["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["rule"].as_str().unwrap())
        .collect();
    assert_eq!(rules, vec!["malformed-marker", "non-literal", "variant"]);

    let malformed = &result["issues"][0];
    assert_eq!(malformed["severity"], "error");
    assert_eq!(malformed["documentId"], "scene.gd");
    assert_eq!(malformed["line"], 2);
    assert_eq!(malformed["column"], 8);

    assert_eq!(texts(&result), vec!["Okay!", "okay"]);
}

#[cfg(unix)]
#[tokio::test]
async fn test_extract_reports_unreadable_directory_entry() {
    let fixture =
        McpTestFixture::with_documents(&[("scenes/intro.gd", "tr(\"Okay!\")\n")]).unwrap();
    let scenes = std::path::Path::new(&fixture.root()).join("scenes");
    std::os::unix::fs::symlink(scenes.join("gone.gd"), scenes.join("link.gd")).unwrap();

    let result = extract(params(&fixture)).await;

    assert_eq!(result["stats"]["complete"], false);
    assert_eq!(result["stats"]["errorCount"], 1);
    assert_eq!(result["issues"][0]["rule"], "read-failure");
    assert_eq!(result["issues"][0]["documentId"], "scenes/link.gd");
    assert_eq!(texts(&result), vec!["Okay!"]);
}

// ============================================================================
// writing
// ============================================================================

#[tokio::test]
async fn test_extract_writes_catalog() {
    let fixture = fixture_two_scenes().unwrap();

    let result = extract(ExtractCatalogParams {
        write: Some(true),
        ..params(&fixture)
    })
    .await;

    assert_eq!(result["written"], "catalog.json");

    let catalog = fixture.read_json("catalog.json").unwrap();
    assert_eq!(catalog["hash"], result["stats"]["hash"]);
    assert_eq!(catalog["entries"].as_array().unwrap().len(), 4);
    assert_eq!(
        catalog["entries"][1]["occurrences"][1]["document_id"],
        "scenes/b_ending.gd"
    );
}

#[tokio::test]
async fn test_extract_writes_to_configured_output() {
    let fixture = fixture_two_scenes().unwrap();
    fixture
        .write_config(&json!({ "output": "locale/strings.json" }))
        .unwrap();

    let result = extract(ExtractCatalogParams {
        write: Some(true),
        ..params(&fixture)
    })
    .await;

    assert_eq!(result["written"], "locale/strings.json");
    assert!(fixture.read_json("locale/strings.json").is_ok());
}

// ============================================================================
// pagination
// ============================================================================

#[tokio::test]
async fn test_extract_pagination() {
    let fixture = fixture_two_scenes().unwrap();

    let first = extract(ExtractCatalogParams {
        limit: Some(3),
        ..params(&fixture)
    })
    .await;
    assert_eq!(texts(&first), vec!["Accelerator", "Okay!", "(sigh)"]);
    assert_pagination(&first, 0, 3, true);

    let second = extract(ExtractCatalogParams {
        limit: Some(3),
        offset: Some(3),
        ..params(&fixture)
    })
    .await;
    assert_eq!(texts(&second), vec!["Goodbye Bones"]);
    assert_pagination(&second, 3, 3, false);
    assert_eq!(second["stats"]["entryCount"], 4);
}

#[tokio::test]
async fn test_extract_limit_is_capped() {
    let fixture = fixture_two_scenes().unwrap();

    let result = extract(ExtractCatalogParams {
        limit: Some(10_000),
        ..params(&fixture)
    })
    .await;

    assert_pagination(&result, 0, 200, false);
}
