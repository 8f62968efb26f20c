use crate::auth::CredentialStore;
use crate::config::Config;
use crate::db::log::audit;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cfg: &Config) -> AppResult<()> {
    if CredentialStore::default_location().clear()? {
        audit(&cfg.database, "logout", "", "credential removed");
        success("Logged out.");
    } else {
        info("No stored credential.");
    }

    Ok(())
}
