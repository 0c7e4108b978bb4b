// src/credential/mod.rs
// =============================================================================
// This module loads the session credential used to authenticate against the
// listing endpoint.
//
// The credential comes from a "copy as cURL" capture taken in a logged-in
// browser. We only need two things out of it:
// - the user agent string (the listing site ties the session to it)
// - the cookie header value (holds the session token)
//
// The credential is loaded once at startup and never changes afterwards.
// =============================================================================

mod capture;

pub use capture::SessionCredential;
