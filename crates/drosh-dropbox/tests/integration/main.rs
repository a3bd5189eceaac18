//! Integration tests for drosh-dropbox
//!
//! Uses wiremock to simulate the Dropbox API and verifies the wire format
//! of uploads and shared link calls, and how error responses are
//! classified at the storage port.

mod common;

mod test_sharing;
mod test_upload;
