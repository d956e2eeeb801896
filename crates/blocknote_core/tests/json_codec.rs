use blocknote_core::model::block::{CalloutContent, TextContent};
use blocknote_core::{
    create_block, create_block_from_tag, decode_document, encode_block, encode_document, Block,
    BlockColor, BlockContent, BlockKind, CalloutIcon, DecodeStatus,
};
use serde_json::{json, Value};

#[test]
fn malformed_inputs_decode_to_empty_documents() {
    for raw in ["not json", "{}", "[1,2,3]", "[{\"type\":\"paragraph\"}]", "\"text\""] {
        let decoded = decode_document(raw);
        assert!(decoded.blocks.is_empty(), "input {raw} produced blocks");
        assert!(decoded.is_malformed(), "input {raw} was not flagged");
    }
}

#[test]
fn unknown_kind_tag_is_malformed() {
    let raw = json!([{
        "id": uuid::Uuid::new_v4().to_string(),
        "type": "banner",
        "content": {"text": "x"},
        "createdAt": 1,
        "updatedAt": 1
    }])
    .to_string();
    assert!(decode_document(&raw).is_malformed());
}

#[test]
fn duplicate_ids_are_malformed() {
    let block = create_block(BlockKind::Paragraph);
    let raw = encode_document(&[block.clone(), block]).unwrap();
    assert!(matches!(
        decode_document(&raw).status,
        DecodeStatus::Malformed(reason) if reason.contains("duplicate")
    ));
}

#[test]
fn every_default_block_round_trips() {
    let blocks = BlockKind::ALL
        .iter()
        .map(|kind| create_block(*kind))
        .collect::<Vec<_>>();
    let raw = encode_document(&blocks).unwrap();
    let decoded = decode_document(&raw);

    assert_eq!(decoded.status, DecodeStatus::Parsed);
    assert_eq!(decoded.blocks, blocks);
}

#[test]
fn wire_shape_uses_camel_case_tags_and_timestamps() {
    let mut block = Block::new(BlockContent::Callout(CalloutContent {
        text: "Tip".to_string(),
        icon: CalloutIcon::Star,
        color: BlockColor::Purple,
    }));
    block.created_at = 10;
    block.updated_at = 20;

    let value: Value = serde_json::from_str(&encode_block(&block).unwrap()).unwrap();
    assert_eq!(value["id"], block.id.to_string());
    assert_eq!(value["type"], "callout");
    assert_eq!(value["content"]["text"], "Tip");
    assert_eq!(value["content"]["icon"], "⭐");
    assert_eq!(value["content"]["color"], "purple");
    assert_eq!(value["createdAt"], 10);
    assert_eq!(value["updatedAt"], 20);
}

#[test]
fn list_kinds_use_camel_case_tags() {
    let value: Value =
        serde_json::from_str(&encode_block(&create_block(BlockKind::BulletList)).unwrap()).unwrap();
    assert_eq!(value["type"], "bulletList");
    assert!(value["content"]["items"].is_array());
}

#[test]
fn divider_has_no_content_key() {
    let value: Value =
        serde_json::from_str(&encode_block(&create_block(BlockKind::Divider)).unwrap()).unwrap();
    assert_eq!(value["type"], "divider");
    assert!(value.get("content").is_none());
}

#[test]
fn missing_payload_fields_take_defaults() {
    let id = uuid::Uuid::new_v4();
    let raw = json!([
        {"id": id.to_string(), "type": "heading2", "content": {}, "createdAt": 1, "updatedAt": 2}
    ])
    .to_string();

    let decoded = decode_document(&raw);
    assert_eq!(decoded.status, DecodeStatus::Parsed);
    assert_eq!(decoded.blocks[0].id, id);
    assert_eq!(
        decoded.blocks[0].content,
        BlockContent::Heading2(TextContent::default())
    );
}

#[test]
fn invalid_structures_are_malformed() {
    let raw = json!([{
        "id": uuid::Uuid::new_v4().to_string(),
        "type": "table",
        "content": {"headers": ["a", "b"], "rows": [{"id": uuid::Uuid::new_v4().to_string(), "cells": ["only one"]}]},
        "createdAt": 1,
        "updatedAt": 1
    }])
    .to_string();
    assert!(decode_document(&raw).is_malformed());
}

#[test]
fn kind_tags_parse_strictly() {
    for kind in BlockKind::ALL {
        assert_eq!(create_block_from_tag(kind.as_str()).unwrap().kind(), kind);
    }
    let err = create_block_from_tag("Paragraph").unwrap_err();
    assert_eq!(err.0, "Paragraph");
}
