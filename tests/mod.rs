//! Test suite for devnest
//!
//! This module organizes all tests

pub mod integration;
pub mod property;
