//! Markup for check results, scan verdicts and error panels.
//!
//! Every server-derived string goes through [`escape_html`] and every link
//! target through [`safe_href`] before it is placed in markup.

use crate::controller::types::{CheckResult, ScanError, ScanPending, ScanResult, ScanVerdict};
use crate::render::escape::{escape_html, escape_opt};
use crate::utils::urls::safe_href;
use chrono::DateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultClass {
    Match,
    Mismatch,
    Unknown,
}

impl ResultClass {
    pub fn css_class(self) -> &'static str {
        match self {
            ResultClass::Match => "match",
            ResultClass::Mismatch => "mismatch",
            ResultClass::Unknown => "unknown",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ResultClass::Match => "Extension Matches",
            ResultClass::Mismatch => "Mismatch Detected",
            ResultClass::Unknown => "Unknown File Type",
        }
    }
}

/// unknown beats mismatch beats match
pub fn classify(result: &CheckResult) -> ResultClass {
    if result.is_unknown() {
        ResultClass::Unknown
    } else if result.mismatch {
        ResultClass::Mismatch
    } else {
        ResultClass::Match
    }
}

pub fn render_result(result: &CheckResult) -> String {
    let class = classify(result);
    let mut html = format!(
        r#"<div class="result-box {class}">
    <h3>{title}</h3>
    <div class="result-grid">
        <div><strong>Filename:</strong><br><span class="result-value">{filename}</span></div>
        <div><strong>Claimed:</strong><br><span class="result-value">{extension}</span></div>
        <div><strong>Detected:</strong><br><span class="result-value">{detected}</span></div>
        <div><strong>Type:</strong><br><span class="result-value">{description}</span></div>
    </div>
    <div class="result-analysis"><strong>Analysis:</strong> {message}</div>
</div>
"#,
        class = class.css_class(),
        title = class.title(),
        filename = escape_html(&result.filename),
        extension = escape_html(&result.extension),
        detected = escape_html(&result.detected_type),
        description = escape_html(&result.detected_description),
        message = escape_html(&result.message),
    );

    if let Some(scan) = &result.virustotal {
        html.push_str(&render_scan(scan));
    }
    html
}

pub fn render_scan(scan: &ScanResult) -> String {
    match scan {
        ScanResult::Error(err) => render_scan_error(err),
        ScanResult::Unscanned(pending) => render_scan_pending(pending),
        ScanResult::Verdict(verdict) => render_scan_verdict(verdict),
        ScanResult::Unrecognised(raw) => render_scan_error(&ScanError {
            error: "Unrecognised scan response.".to_string(),
            message: raw
                .get("message")
                .and_then(|m| m.as_str())
                .map(String::from),
            details: None,
        }),
    }
}

fn render_scan_error(err: &ScanError) -> String {
    let detail = err.message.as_deref().or(err.details.as_deref());
    let detail = match detail {
        Some(text) => format!("\n    <p>{}</p>", escape_html(text)),
        None => String::new(),
    };
    format!(
        r#"<div class="result-box mismatch scan scan-error">
    <h4>VirusTotal Error</h4>
    <p>{error}</p>{detail}
</div>
"#,
        error = escape_html(&err.error),
    )
}

fn render_scan_pending(pending: &ScanPending) -> String {
    format!(
        r#"<div class="result-box unknown scan scan-pending">
    <h4>VirusTotal Scan</h4>
    <p>{message}</p>
    <p><strong>SHA-256:</strong> <code>{filehash}</code></p>
    <a href="{link}" target="_blank" rel="noopener noreferrer" class="btn">Upload for Scanning</a>
</div>
"#,
        message = escape_opt(pending.message.as_deref()),
        filehash = escape_html(&pending.filehash),
        link = escape_html(&safe_href(&pending.link)),
    )
}

fn render_scan_verdict(verdict: &ScanVerdict) -> String {
    let (color, state) = if verdict.is_clean() {
        ("match", "scan-clean")
    } else {
        ("mismatch", "scan-flagged")
    };
    let status = verdict
        .status
        .as_deref()
        .map(|s| {
            format!(
                "\n    <p class=\"scan-status\"><strong>Status:</strong> {}</p>",
                escape_html(s)
            )
        })
        .unwrap_or_default();
    let analysed = verdict
        .date
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|at| {
            format!(
                "\n    <p class=\"scan-date\">Last analysed {}</p>",
                at.format("%Y-%m-%d %H:%M UTC")
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="result-box {color} scan {state}">
    <h4>VirusTotal Scan</h4>
    <div class="scan-counts">
        <span class="count-malicious">Malicious: {malicious}</span>
        <span class="count-suspicious">Suspicious: {suspicious}</span>
        <span class="count-harmless">Harmless: {harmless}</span>
        <span class="count-undetected">Undetected: {undetected}</span>
    </div>
    <p><strong>SHA-256:</strong> <code>{filehash}</code></p>{status}{analysed}
    <a href="{permalink}" target="_blank" rel="noopener noreferrer" class="btn">View Full Report</a>
</div>
"#,
        malicious = verdict.malicious,
        suspicious = verdict.suspicious,
        harmless = verdict.harmless,
        undetected = verdict.undetected,
        filehash = escape_html(&verdict.filehash),
        permalink = escape_html(&safe_href(&verdict.permalink)),
    )
}

/// Validation, transport and server errors share the mismatch panel.
pub fn render_error(message: &str) -> String {
    format!(
        r#"<div class="result-box mismatch">
    <h3>Error</h3>
    <p>{}</p>
</div>
"#,
        escape_html(message)
    )
}
