// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Generates arbitrary incidents and maintenances against the fixture
//! hierarchy and checks the rollup invariants.

mod rollup;
