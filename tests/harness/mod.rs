#![allow(dead_code)]

pub mod temp_config;
