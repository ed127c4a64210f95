//! Text formatting for tool results.
//!
//! Turns structured ARM results into the human-readable blocks the tools
//! return. Listings use a header with a rule, one `Field: value` line per
//! attribute, and a short rule between entries.

use crate::azure::models::{Database, ResourceGroup, SqlServer};
use std::collections::HashMap;

const HEADER_RULE: &str = "==================================================";
const ENTRY_RULE_SHORT: &str = "------------------------------";
const ENTRY_RULE_LONG: &str = "--------------------------------------------------";

fn opt(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}

fn format_tags(tags: Option<&HashMap<String, String>>) -> String {
    match tags {
        Some(tags) if !tags.is_empty() => {
            let mut pairs: Vec<_> = tags.iter().collect();
            pairs.sort_by_key(|(k, _)| k.as_str());
            pairs
                .into_iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(", ")
        }
        _ => "None".to_string(),
    }
}

/// Format the resource group listing.
pub fn format_resource_groups(groups: &[ResourceGroup]) -> String {
    if groups.is_empty() {
        return "No resource groups found in the subscription.".to_string();
    }

    let mut lines = vec!["RESOURCE GROUPS".to_string(), HEADER_RULE.to_string()];
    for rg in groups {
        lines.push(format!("Name: {}", rg.name));
        lines.push(format!("Location: {}", rg.location));
        lines.push(format!("Tags: {}", format_tags(rg.tags.as_ref())));
        lines.push(ENTRY_RULE_SHORT.to_string());
    }
    lines.join("\n")
}

/// Format the resource group creation confirmation.
pub fn format_resource_group_created(name: &str, location: &str) -> String {
    format!(
        "Resource group '{}' created successfully in {}",
        name, location
    )
}

/// Format the SQL server listing, optionally scoped to a resource group.
pub fn format_sql_servers(servers: &[SqlServer], resource_group: Option<&str>) -> String {
    if servers.is_empty() {
        let location_msg = match resource_group {
            Some(rg) => format!(" in resource group '{}'", rg),
            None => String::new(),
        };
        return format!("No SQL servers found{}.", location_msg);
    }

    let mut lines = vec!["SQL SERVERS".to_string(), HEADER_RULE.to_string()];
    for server in servers {
        lines.push(format!("Name: {}", server.name));
        lines.push(format!("Location: {}", server.location));
        lines.push(format!(
            "Resource Group: {}",
            opt(server.resource_group())
        ));
        lines.push(format!("State: {}", opt(server.properties.state.as_deref())));
        lines.push(format!(
            "Version: {}",
            opt(server.properties.version.as_deref())
        ));
        lines.push(format!(
            "Admin Login: {}",
            opt(server.properties.administrator_login.as_deref())
        ));
        lines.push(format!(
            "Fully Qualified Domain Name: {}",
            opt(server.properties.fully_qualified_domain_name.as_deref())
        ));
        lines.push(ENTRY_RULE_LONG.to_string());
    }
    lines.join("\n")
}

/// Format the SQL server creation confirmation.
pub fn format_server_created(server: &SqlServer) -> String {
    format!(
        "SQL Server created successfully!\n\
         Name: {}\n\
         Location: {}\n\
         State: {}\n\
         FQDN: {}\n\
         Admin Login: {}\n\
         \n\
         Next steps:\n\
         1. Configure firewall rules to allow connections\n\
         2. Create databases on this server",
        server.name,
        server.location,
        opt(server.properties.state.as_deref()),
        opt(server.properties.fully_qualified_domain_name.as_deref()),
        opt(server.properties.administrator_login.as_deref()),
    )
}

/// Format the database listing for one server.
pub fn format_databases(server_name: &str, databases: &[Database]) -> String {
    if databases.is_empty() {
        return format!("No databases found on server '{}'.", server_name);
    }

    let mut lines = vec![
        format!("DATABASES ON {}", server_name),
        HEADER_RULE.to_string(),
    ];
    for db in databases {
        let edition = db.sku.as_ref().and_then(|s| s.tier.as_deref());
        let objective = db
            .sku
            .as_ref()
            .map(|s| s.name.as_str())
            .or(db.properties.current_service_objective_name.as_deref());
        let max_size = db
            .properties
            .max_size_bytes
            .map(|b| b.to_string());
        let created = db
            .properties
            .creation_date
            .map(|d| d.to_rfc3339());

        lines.push(format!("Name: {}", db.name));
        lines.push(format!("Status: {}", opt(db.properties.status.as_deref())));
        lines.push(format!("Edition: {}", opt(edition)));
        lines.push(format!("Service Objective: {}", opt(objective)));
        lines.push(format!("Max Size: {}", opt(max_size.as_deref())));
        lines.push(format!("Creation Date: {}", opt(created.as_deref())));
        lines.push(ENTRY_RULE_SHORT.to_string());
    }
    lines.join("\n")
}

/// Format the database creation confirmation.
pub fn format_database_created(server_name: &str, database_name: &str, db: &Database) -> String {
    let edition = db.sku.as_ref().and_then(|s| s.tier.as_deref());
    let objective = db.sku.as_ref().map(|s| s.name.as_str());
    let created = db.properties.creation_date.map(|d| d.to_rfc3339());

    format!(
        "Database created successfully!\n\
         Name: {}\n\
         Location: {}\n\
         Edition: {}\n\
         Service Objective: {}\n\
         Status: {}\n\
         Creation Date: {}\n\
         \n\
         Connection string format:\n\
         Server={}.database.windows.net;Database={};",
        db.name,
        opt(db.location.as_deref()),
        opt(edition),
        opt(objective),
        opt(db.properties.status.as_deref()),
        opt(created.as_deref()),
        server_name,
        database_name,
    )
}
