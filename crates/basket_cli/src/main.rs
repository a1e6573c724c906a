//! `basket` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Open the database and dispatch to `basket_core` services.
//! - Render results as plain lines or JSON.

mod cli;

use anyhow::{anyhow, Context, Result};
use basket_core::{
    categorize, category_label, category_label_en, format_epoch_ms, format_rfc3339, init_logging,
    open_db, ChatService, ContactService, CoreConfig, DateLocale, ProductListDraft,
    ShoppingService, SqliteContactRepository, SqliteMessageRepository, SqliteShoppingRepository,
    SqliteUserRepository, UserProfile, UserRepository,
};
use chrono::Offset;
use clap::Parser;
use cli::{ChatCommands, Cli, Commands, ContactCommands, ShopCommands, UserCommands};
use log::info;
use rusqlite::Connection;
use serde::Serialize;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli);

    if let Some(log_dir) = &config.log_dir {
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| anyhow!("log directory is not valid UTF-8"))?;
        init_logging(&config.log_level, log_dir).context("failed to initialize logging")?;
    }

    run(cli, &config)
}

fn resolve_config(cli: &Cli) -> CoreConfig {
    let mut config = CoreConfig::from_env();
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    config
}

fn run(cli: Cli, config: &CoreConfig) -> Result<()> {
    let json = cli.json;
    match cli.command {
        Commands::Categorize { names, english } => {
            let rows: Vec<_> = names
                .iter()
                .map(|name| {
                    let id = categorize(name);
                    CategorizedName {
                        name: name.as_str(),
                        category_id: id,
                        label: label_for(i64::from(id), english),
                    }
                })
                .collect();
            if json {
                return print_json(&rows);
            }
            for row in rows {
                println!("{}\t{}\t{}", row.category_id, row.label, row.name);
            }
            Ok(())
        }
        Commands::Label { id, english } => {
            println!("{}", label_for(id, english));
            Ok(())
        }
        Commands::FormatDate { timestamp, english } => {
            println!("{}", format_rfc3339(&timestamp, locale_for(english))?);
            Ok(())
        }
        Commands::User { action } => with_db(config, |conn| run_user(conn, action, json)),
        Commands::Contact { action } => with_db(config, |conn| run_contact(conn, action, json)),
        Commands::Chat { action } => with_db(config, |conn| run_chat(conn, action, json)),
        Commands::Shop { action } => with_db(config, |conn| run_shop(conn, action, json)),
    }
}

#[derive(Serialize)]
struct CategorizedName<'a> {
    name: &'a str,
    category_id: u8,
    label: &'static str,
}

fn with_db(config: &CoreConfig, f: impl FnOnce(&Connection) -> Result<()>) -> Result<()> {
    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open database at {}", config.db_path.display()))?;
    info!("event=cli_command module=cli status=start");
    f(&conn)
}

fn run_user(conn: &Connection, action: UserCommands, json: bool) -> Result<()> {
    let users = SqliteUserRepository::new(conn);
    match action {
        UserCommands::Add {
            name,
            username,
            display_name,
            email,
        } => {
            let mut profile = UserProfile::new(name);
            profile.username = username;
            profile.display_name = display_name;
            profile.email = email;
            let id = users.create_user(&profile)?;
            println!("{id}");
        }
        UserCommands::Show { id } => {
            let profile = users
                .get_user(id)?
                .ok_or_else(|| anyhow!("user not found: {id}"))?;
            if json {
                return print_json(&profile);
            }
            println!("{}\t{}", profile.id, profile.display_label());
        }
    }
    Ok(())
}

fn run_contact(conn: &Connection, action: ContactCommands, json: bool) -> Result<()> {
    let service = ContactService::new(
        SqliteUserRepository::new(conn),
        SqliteContactRepository::new(conn),
    );
    match action {
        ContactCommands::Search { viewer, term } => {
            let hits = service.search(viewer.id, &term)?;
            if json {
                return print_json(&hits);
            }
            for hit in hits {
                let marker = if hit.is_contact { "*" } else { " " };
                println!("{marker} {}\t{}", hit.profile.id, hit.profile.display_label());
            }
        }
        ContactCommands::Add { viewer, contact } => {
            let created = service.add(viewer.id, contact)?;
            println!("{}", if created { "added" } else { "already a contact" });
        }
        ContactCommands::Remove { viewer, contact } => {
            let removed = service.remove(viewer.id, contact)?;
            println!("{}", if removed { "removed" } else { "not a contact" });
        }
        ContactCommands::List { viewer } => {
            let contacts = service.list(viewer.id)?;
            if json {
                return print_json(&contacts);
            }
            for contact in contacts {
                println!("{}\t{}", contact.profile.id, contact.profile.display_label());
            }
        }
    }
    Ok(())
}

fn run_chat(conn: &Connection, action: ChatCommands, json: bool) -> Result<()> {
    let service = ChatService::new(
        SqliteUserRepository::new(conn),
        SqliteMessageRepository::new(conn),
    );
    match action {
        ChatCommands::Send { viewer, to, text } => {
            let sent = service.send_text(viewer.id, to, text)?;
            println!("{}", sent.id);
        }
        ChatCommands::SendList {
            viewer,
            to,
            title,
            items,
        } => {
            let mut draft = ProductListDraft::new();
            if let Some(title) = title {
                draft.set_title(title);
            }
            for item in &items {
                let (name, quantity) = split_item(item);
                draft.add_product(name, quantity);
            }
            let sent = service.send_product_list(viewer.id, to, draft.finish()?)?;
            if json {
                return print_json(&sent);
            }
            println!("{}\t{}", sent.id, sent.preview());
        }
        ChatCommands::History {
            viewer,
            with,
            english,
        } => {
            let messages = service.conversation(viewer.id, with)?;
            if json {
                return print_json(&messages);
            }
            let offset = chrono::Local::now().offset().fix();
            let locale = locale_for(english);
            for message in messages {
                let when = format_epoch_ms(message.sent_at, offset, locale)
                    .unwrap_or_else(|| message.sent_at.to_string());
                let direction = if message.sender_id == viewer.id { ">" } else { "<" };
                println!("{direction} [{when}] {}", message.preview());
                if let Some(list) = &message.product_list {
                    for product in &list.products {
                        let category = product.category_id.unwrap_or(9);
                        println!(
                            "    {} x{} ({})",
                            product.name,
                            product.quantity,
                            label_for(i64::from(category), english)
                        );
                    }
                }
            }
        }
        ChatCommands::Unread { viewer, limit } => {
            let unread = service.unread(viewer.id, limit)?;
            if json {
                return print_json(&unread);
            }
            for summary in unread {
                println!(
                    "{}\t{}\t{}: {}",
                    summary.message_id, summary.kind_label, summary.sender_label, summary.preview
                );
            }
        }
        ChatCommands::Read { viewer, message } => {
            let marked = service.mark_read(viewer.id, message)?;
            println!("{}", if marked { "marked read" } else { "already read" });
        }
    }
    Ok(())
}

fn run_shop(conn: &Connection, action: ShopCommands, json: bool) -> Result<()> {
    let service = ShoppingService::new(SqliteShoppingRepository::new(conn));
    match action {
        ShopCommands::Add {
            viewer,
            name,
            quantity,
        } => {
            let item = service.add_item(viewer.id, &name, quantity)?;
            println!("{}\t{}", item.id, category_label(item.category_id));
        }
        ShopCommands::List { viewer, grouped } => {
            if grouped {
                let groups = service.grouped(viewer.id)?;
                if json {
                    return print_json(&groups);
                }
                for group in groups {
                    println!("{}", group.label);
                    for item in group.items {
                        println!("  {}", item_line(&item));
                    }
                }
            } else {
                let items = service.list(viewer.id)?;
                if json {
                    return print_json(&items);
                }
                for item in items {
                    println!("{}", item_line(&item));
                }
            }
        }
        ShopCommands::Toggle { viewer, item } => {
            let item = service.toggle_completed(viewer.id, item)?;
            println!("{}", item_line(&item));
        }
        ShopCommands::Remove { viewer, item } => {
            service.remove(viewer.id, item)?;
            println!("removed");
        }
    }
    Ok(())
}

fn item_line(item: &basket_core::ShoppingItem) -> String {
    let check = if item.completed { "x" } else { " " };
    format!("[{check}] {}\t{} x{}", item.id, item.name, item.quantity)
}

/// Splits `name:quantity` at the last `:`, so names may contain colons but
/// the quantity never does. A missing or empty quantity falls back to the
/// draft's own default.
fn split_item(raw: &str) -> (&str, &str) {
    match raw.rsplit_once(':') {
        Some((name, quantity)) if !name.trim().is_empty() => (name, quantity),
        _ => (raw, ""),
    }
}

fn label_for(id: i64, english: bool) -> &'static str {
    if english {
        category_label_en(id)
    } else {
        category_label(id)
    }
}

fn locale_for(english: bool) -> DateLocale {
    if english {
        DateLocale::English
    } else {
        DateLocale::Arabic
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
