//! `stats` and `check` output.

use tscat_catalog::{Catalog, Finding, Stats};

pub fn stats(catalog: &Catalog, json: bool) -> anyhow::Result<String> {
    let stats = catalog.stats();
    if json {
        return Ok(serde_json::to_string_pretty(&stats)? + "\n");
    }
    Ok(render_stats(&stats))
}

pub fn check(catalog: &Catalog, json: bool) -> anyhow::Result<String> {
    let findings = tscat_catalog::check(catalog);
    if json {
        return Ok(serde_json::to_string_pretty(&findings)? + "\n");
    }
    Ok(render_findings(&findings))
}

fn render_stats(stats: &Stats) -> String {
    let t = &stats.totals;
    let mut out = format!(
        "Language:   {}\n\
         Translated: {}\n\
         Unfinished: {}\n\
         Obsolete:   {}\n\
         Completion: {:.1}%\n",
        if stats.language.is_empty() { "-" } else { stats.language.as_str() },
        t.translated,
        t.unfinished,
        t.obsolete,
        stats.completion * 100.0,
    );
    if stats.contexts.is_empty() {
        return out;
    }

    let width = stats
        .contexts
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);
    out.push('\n');
    for ctx in &stats.contexts {
        let c = &ctx.counts;
        out.push_str(&format!(
            "  {:<width$}  {:>3}/{:<3}  {:>5.1}%\n",
            ctx.name,
            c.translated,
            c.translated + c.unfinished,
            c.completion() * 100.0,
        ));
    }
    out
}

fn render_findings(findings: &[Finding]) -> String {
    if findings.is_empty() {
        return "No issues found.\n".to_string();
    }
    let mut out = String::new();
    for f in findings {
        out.push_str(&format!("{}: \"{}\": {}\n", f.context, f.source, f.issue));
    }
    out.push_str(&format!(
        "\n{} issue{} found.\n",
        findings.len(),
        if findings.len() == 1 { "" } else { "s" }
    ));
    out
}
