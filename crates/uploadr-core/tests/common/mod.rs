#![allow(dead_code)]

pub mod resp_server;
pub mod scripted;
