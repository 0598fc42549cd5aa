//! Well-formed catalog items, one per variant.

#![allow(dead_code)]

use serde_json::{json, Value};

pub fn owner() -> Value {
    json!({
        "avatarUrl": "u",
        "fullname": "X",
        "type": "user",
        "name": "x",
        "isHf": false,
        "isHfAdmin": false,
        "isMod": false
    })
}

pub fn model() -> Value {
    json!({
        "_id": "1",
        "position": 0,
        "type": "model",
        "id": "m1",
        "author": "x",
        "authorData": owner(),
        "downloads": 5,
        "gated": false,
        "availableInferenceProviders": [],
        "lastModified": "2024",
        "likes": 0,
        "isLikedByUser": false,
        "private": false,
        "repoType": "model"
    })
}

pub fn dataset() -> Value {
    json!({
        "_id": "2",
        "position": 1,
        "type": "dataset",
        "id": "org/data",
        "author": "org",
        "downloads": 120,
        "gated": "manual",
        "lastModified": "2024-05-01T00:00:00.000Z",
        "likes": 4,
        "isLikedByUser": false,
        "private": false,
        "repoType": "dataset",
        "datasetsServerInfo": {
            "viewer": "viewer",
            "numRows": 1000,
            "libraries": ["datasets", "pandas"],
            "formats": ["parquet"],
            "modalities": ["text"]
        }
    })
}

pub fn space() -> Value {
    json!({
        "_id": "3",
        "position": 2,
        "type": "space",
        "id": "org/demo",
        "author": "org",
        "authorData": owner(),
        "createdAt": "2024-01-01",
        "lastModified": "2024-02-01",
        "likes": 9,
        "isLikedByUser": true,
        "private": false,
        "repoType": "space",
        "sdk": "gradio",
        "tags": ["gradio"],
        "pinned": false,
        "emoji": "🚀",
        "runtime": {
            "stage": "RUNNING",
            "hardware": { "current": "cpu-basic", "requested": null },
            "storage": null,
            "gcTimeout": 172800,
            "replicas": { "current": 1, "requested": "auto" },
            "domains": [{ "domain": "org-demo.hf.space", "stage": "READY" }],
            "sha": "abc123"
        },
        "title": "Demo",
        "trendingScore": 0
    })
}

pub fn paper() -> Value {
    json!({
        "_id": "4",
        "position": 3,
        "type": "paper",
        "id": "2401.00001",
        "title": "A paper",
        "thumbnailUrl": "https://example.org/thumb.png",
        "upvotes": 12,
        "isUpvotedByUser": false,
        "publishedAt": "2024-01-02"
    })
}

pub fn collection() -> Value {
    json!({
        "_id": "5",
        "position": 4,
        "type": "collection",
        "id": "org/nested-abc",
        "slug": "org/nested-abc",
        "title": "Nested",
        "description": "A nested collection",
        "lastUpdated": "2024-03-03",
        "numberItems": 7,
        "owner": owner(),
        "theme": "green",
        "shareUrl": "https://example.org/c/org/nested-abc",
        "upvotes": 2,
        "isUpvotedByUser": false,
        "note": { "html": "<b>hi</b>", "text": "hi" },
        "gallery": ["https://example.org/g.png"]
    })
}

pub fn all_variants() -> Vec<Value> {
    vec![model(), dataset(), space(), paper(), collection()]
}
