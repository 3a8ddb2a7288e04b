//! On-target tests for the button panel live in `tests/`

#![no_std]
