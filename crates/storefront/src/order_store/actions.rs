use crate::model::AccessToken;

/// Order actions. Every action resolves to the order list held once it finished.
#[derive(Debug, Clone)]
pub enum OrderAction {
    Fetch { token: AccessToken },
    /// Turns the server-side cart into an order shipped to `shipping_address`.
    Create {
        shipping_address: String,
        token: AccessToken,
    },
    Discard,
}
