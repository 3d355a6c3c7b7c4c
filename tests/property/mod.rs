//! Property-based tests

mod membership_proptest;
