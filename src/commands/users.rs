//! Users command - User administration through the user service.

use std::sync::Arc;

use super::print_json;
use crate::cli::args::{UsersAction, UsersArgs};
use crate::config::Config;
use crate::domain::{NewUser, UserChanges};
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};
use crate::services::{UserManager, UserService};

/// Execute the users command
pub async fn execute(args: UsersArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let service = UserManager::new(Arc::new(Persistence::new(db.get_connection())));

    run(&service, args.action).await
}

/// Dispatch one action against any UserService and print the result as JSON.
pub async fn run(service: &dyn UserService, action: UsersAction) -> AppResult<()> {
    match action {
        UsersAction::List => print_json(&service.list_users().await?),
        UsersAction::Get { id } => print_json(&service.get_user(id).await?),
        UsersAction::Add { name, email, phone } => {
            let user = service.create_user(NewUser { name, email, phone }).await?;
            print_json(&user)
        }
        UsersAction::Update {
            id,
            name,
            email,
            phone,
        } => {
            let user = service
                .update_user(id, UserChanges { name, email, phone })
                .await?;
            print_json(&user)
        }
        UsersAction::Remove { id } => {
            service.delete_user(id).await?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
        UsersAction::Exists { email } => {
            let exists = service.email_taken(&email).await?;
            print_json(&serde_json::json!({ "email": email, "exists": exists }))
        }
        UsersAction::Count => {
            print_json(&serde_json::json!({ "count": service.count_users().await? }))
        }
    }
}
