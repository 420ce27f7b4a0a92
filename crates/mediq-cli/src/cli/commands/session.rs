//! Session command handlers.

use anyhow::Result;
use mediq_core::session::SessionStore;

pub fn whoami(store: &SessionStore) -> Result<()> {
    match store.user() {
        Some(user) => {
            println!("Logged in as {} ({})", user.email, user.role);
            println!("User id: {}", user.id);
        }
        None => println!("Not logged in."),
    }
    Ok(())
}

pub fn logout(store: &SessionStore) -> Result<()> {
    let had_session = store.session().is_some();
    store.clear()?;
    if had_session {
        println!("Logged out.");
    } else {
        println!("No active session.");
    }
    Ok(())
}
