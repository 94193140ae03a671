use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::database::models::Project;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(map)) = (data, response.as_object_mut()) {
                map.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// JSON mode prints `data` as-is; text mode defers to `render`
pub fn output_data<T: Serialize>(
    output_format: OutputFormat,
    data: &T,
    render: impl FnOnce(&T),
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Text => render(data),
    }
    Ok(())
}

/// `Rp 5.000.000` or `Rp 1.250,50`
pub fn format_rupiah(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole.to_string(), Some(fraction.to_string())),
        None => (text, None),
    };

    let mut grouped = String::new();
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    match fraction {
        Some(fraction) if fraction.trim_end_matches('0').is_empty() => format!("{}Rp {}", sign, grouped),
        Some(fraction) => format!("{}Rp {},{:0<2}", sign, grouped, fraction),
        None => format!("{}Rp {}", sign, grouped),
    }
}

pub fn print_project_table(projects: &[Project]) {
    if projects.is_empty() {
        println!("No projects found");
        return;
    }

    println!("{:>5}  {:>4}  {:<12}  {:>18}  TITLE", "ID", "RANK", "STATUS", "BUDGET");
    for project in projects {
        let rank = project
            .priority
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>5}  {:>4}  {:<12}  {:>18}  {}",
            project.project_id,
            rank,
            project.status,
            format_rupiah(project.estimated_budget),
            project.title
        );
    }
}

pub fn print_project(project: &Project) {
    println!("Project #{}: {}", project.project_id, project.title);
    println!("  Status:      {}", project.status);
    if let Some(priority) = project.priority {
        println!("  Priority:    {}", priority);
    }
    println!("  Budget:      {}", format_rupiah(project.estimated_budget));
    if let Some(location) = &project.location {
        println!("  Location:    {}", location);
    }
    if let Some(description) = &project.description {
        println!("  Description: {}", description);
    }
    println!("  Created:     {}", project.created_at.format("%Y-%m-%d %H:%M"));
}
