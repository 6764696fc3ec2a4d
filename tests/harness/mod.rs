#![allow(dead_code)]

pub mod fake_launcher;
pub mod recording_replier;
pub mod service_tree;
