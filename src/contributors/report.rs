use super::analyzer::Contributor;
use crate::report_helpers;

const BAR_WIDTH: usize = 20;

pub fn print_report(contributors: &[Contributor], radar_floor: usize) {
    if contributors.is_empty() {
        println!("No contributors found.");
        return;
    }

    let name_w = report_helpers::max_width(contributors.iter().map(|c| c.name.as_str()), 6);
    let header_width = name_w + 48;
    let separator = report_helpers::separator(header_width.max(72));

    println!("Contributors");
    println!("{separator}");
    println!(
        " {:<nw$}  {:>7}  {:<13}  Top areas",
        "Author",
        "Commits",
        "Focus",
        nw = name_w
    );
    println!("{separator}");
    for c in contributors {
        println!(
            " {:<nw$}  {:>7}  {:<13}  {}",
            c.name,
            c.commits,
            c.focus.label(),
            if c.top_areas.is_empty() {
                "-".to_string()
            } else {
                c.top_areas.join(", ")
            },
            nw = name_w
        );
    }
    println!("{separator}");

    for c in contributors {
        println!();
        println!("{} <{}>", c.name, c.email);
        for (area, pct) in c.radar.iter() {
            // Zero axes still get a sliver so the shape stays readable.
            println!(
                "  {:<9} {} {:>3}%",
                area.label(),
                report_helpers::bar(pct.max(radar_floor), BAR_WIDTH),
                pct
            );
        }
    }
}

pub fn print_json(contributors: &[Contributor]) -> Result<(), Box<dyn std::error::Error>> {
    report_helpers::print_json_stdout(&contributors)
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
