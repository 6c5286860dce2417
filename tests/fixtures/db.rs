// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entities compiled against their generated repositories.
//!
//! The markers sit behind `cfg_attr(entity_codegen, ...)` so rustc drops
//! them while the generator still reads them.

#![allow(unexpected_cfgs, dead_code)]

use std::sync::atomic::{AtomicI64, Ordering};

static NEXT_EVENT: AtomicI64 = AtomicI64::new(1);

/// Identifier factory for [`Event`].
pub fn next_event_id() -> i64 {
    NEXT_EVENT.fetch_add(1, Ordering::Relaxed)
}

#[cfg_attr(entity_codegen, entity)]
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id:   i64,
    pub name: String,
    pub age:  i32
}

#[cfg_attr(entity_codegen, entity(table = "samples", unique(level, label)))]
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub id:      sqlx::types::Uuid,
    #[cfg_attr(entity_codegen, column(references = "User"))]
    pub owner:   i64,
    pub offset:  i8,
    pub level:   u8,
    pub ceiling: Option<u16>,
    pub count:   u32,
    pub grade:   char,
    pub backup:  Option<char>,
    pub label:   Box<str>,
    pub tag:     std::sync::Arc<str>,
    pub note:    Option<Box<str>>,
    pub created: sqlx::types::chrono::DateTime<sqlx::types::chrono::Utc>,
    pub payload: serde_json::Value,
    pub active:  bool,
    #[cfg_attr(entity_codegen, transient)]
    pub cache:   Vec<String>
}

#[cfg_attr(entity_codegen, entity(table = "events"))]
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    #[cfg_attr(entity_codegen, column(id, generator = "crate::db::next_event_id"))]
    pub key:  i64,
    pub kind: String
}
