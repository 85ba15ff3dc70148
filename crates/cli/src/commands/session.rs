//! Sign-in commands.
//!
//! The remote user lookup is not part of this tool: `login` takes the
//! profile fields directly and records them as the signed-in user.

use storefront_mobile_cart::{IdentityError, IdentityScope};
use storefront_mobile_core::{Email, EmailError, UserId, UserProfile};
use thiserror::Error;
use tracing::info;

use super::Client;

/// Errors that can occur during login.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error(transparent)]
    Identity(#[from] IdentityError),
}

/// Sign in and switch to the user's cart.
///
/// # Errors
///
/// Returns `LoginError` if the email is invalid or the user cannot be
/// persisted.
pub async fn login(
    client: &Client,
    id: i64,
    name: String,
    username: String,
    email: &str,
) -> Result<(), LoginError> {
    let user = UserProfile {
        id: UserId::new(id),
        name,
        username,
        email: Email::parse(email)?,
        phone: None,
        website: None,
    };
    let scope = IdentityScope::from_user(Some(&user));

    client.identity.sign_in(user).await?;
    let cart = client.cart.ready_for(&scope).await;

    info!("Signed in. Cart has {} item(s), total {}", cart.item_count(), cart.total());
    Ok(())
}

/// Sign out and switch back to the guest cart.
pub async fn logout(client: &Client) {
    client.identity.sign_out().await;
    let cart = client.cart.ready_for(&IdentityScope::Guest).await;
    info!("Signed out. Guest cart has {} item(s)", cart.item_count());
}

/// Log the signed-in user, if any.
pub fn whoami(client: &Client) {
    match client.identity.current() {
        Some(user) => {
            info!("{} (@{})", user.name, user.username);
            info!("  ID: {}", user.id);
            info!("  Email: {}", user.email);
        }
        None => info!("Not signed in (guest)"),
    }
}
