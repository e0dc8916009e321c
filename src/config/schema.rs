use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "service": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "base_url": { "type": "string", "format": "uri" },
                    "timeout_secs": { "type": "integer", "minimum": 1 }
                }
            },
            "storage": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "path": { "type": "string", "minLength": 1 }
                }
            },
            "submission": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "default_platform": {
                        "type": "string",
                        "enum": ["PLATFORM_UNSPECIFIED", "UNSPECIFIED", "ANDROID", "IOS", "MACOS", "WINDOWS"]
                    },
                    "default_region_codes": {
                        "type": "array",
                        "items": { "type": "string", "pattern": "^[A-Z]{2}$" }
                    }
                }
            }
        }
    })
});
