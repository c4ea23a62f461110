//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate for every store.
//!
//! The compact format hides the module prefix (`with_target(false)`); store actors tag their
//! lines with a `store` field instead.
//!
//! ## What Gets Traced
//!
//! - **Store Lifecycle**: `Store started` / `Shutdown`
//! - **Actions**: every dispatched action at `debug`, its outcome at `info` / `warn`
//! - **Client Calls**: `#[instrument]` spans on the domain clients (`login`, `add`, ...)
//! - **HTTP**: one `debug` line (`HTTP request`) per request with method and path, inside a span
//!   named after the endpoint
//!
//! ## Usage Examples
//!
//! ```bash
//! # Outcomes only
//! RUST_LOG=info cargo run -p storefront -- catalog
//!
//! # Full action payloads
//! RUST_LOG=debug cargo run -p storefront -- login -e alice@example.com -p secret-pass
//!
//! # Only the cart store and the HTTP layer
//! RUST_LOG=storefront::cart_store=debug,storefront::api=debug cargo run -p storefront -- cart
//! ```
//!
//! **With `RUST_LOG=debug`**:
//!
//! ```text
//! DEBUG Action store="SessionState" action=Login(Credentials { email: "alice@example.com", password: SecretBox<str>([REDACTED]) })
//! DEBUG login: HTTP request method=POST path="user/login/"
//! INFO Action ok store="SessionState"
//! DEBUG Action store="CartState" action=Fetch { token: AccessToken(SecretBox<str>([REDACTED])) }
//! DEBUG cart: HTTP request method=GET path="cart/"
//! INFO Action ok store="CartState"
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Store name travels as a field
        .compact()
        .init();
}
