// ABOUTME: Utility modules for common functionality across the application
// ABOUTME: Contains header parsing and input sanitizing helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

/// Bearer token extraction
pub mod auth;
/// HTML encoding of untrusted input
pub mod html;
