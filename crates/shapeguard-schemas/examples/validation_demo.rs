//! Validation demonstration example
//!
//! Copyright (c) 2025 Shapeguard Team
//! Licensed under the Apache-2.0 license

use serde_json::{json, Value};
use shapeguard_schemas::loader::{DocumentLoader, Format};
use shapeguard_schemas::{Method, PayloadValidator, RequestContext};

const SCHEMA: &str = r#"
root:
  posts:
    type: collection
    schema: Post
Post:
  title:
    type: string
    validation:
      - minLength: 3
  tags:
    type: collection
    schema: string
  author:
    type: object
    schema: Author
Author:
  name:
    type: string
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Shapeguard Validation Demo ===\n");

    let document = DocumentLoader::new().load_str(SCHEMA, Format::Yaml)?;
    let validator = PayloadValidator::new(document);

    let create = RequestContext::new(Method::Post, "/posts");
    let update = RequestContext::new(Method::Patch, "/posts/7");

    show(
        &validator,
        &create,
        "valid post",
        json!({"title": "Hello", "tags": ["intro"], "author": {"name": "Ada"}}),
    );
    show(&validator, &create, "missing author", json!({"title": "Hello", "tags": []}));
    show(
        &validator,
        &create,
        "title too short",
        json!({"title": "Hi", "tags": [], "author": {"name": "Ada"}}),
    );
    show(&validator, &update, "partial update", json!({"tags": ["edited"]}));
    show(
        &validator,
        &update,
        "partial update, nested object incomplete",
        json!({"author": {}}),
    );

    Ok(())
}

fn show(validator: &PayloadValidator, request: &RequestContext, label: &str, body: Value) {
    print!("{} {} ({}): ", request.method, request.path(), label);
    match validator.validate(request, &body) {
        Ok(verdict) => println!("{:?}", verdict),
        Err(e) => println!("rejected at {}: {}", e.path, e),
    }
}
