//! End-of-run summary

use crate::crawler::CrawlReport;

/// Formats the end-of-run summary shown to the operator
pub fn format_summary(report: &CrawlReport) -> String {
    let mut out = String::new();

    out.push_str("=== Crawl Summary ===\n\n");
    out.push_str(&format!("  URLs crawled: {}\n", report.crawled.len()));
    out.push_str(&format!("  Pages processed: {}\n", report.pages_processed));
    out.push_str(&format!(
        "  Admitted from pages: {}\n",
        report.admitted_from_pages
    ));
    out.push_str(&format!(
        "  Admitted from sitemaps: {}\n",
        report.admitted_from_sitemaps
    ));
    out.push_str(&format!("  Stopped: {}\n", report.termination));
    out.push_str(&format!(
        "  Elapsed: {:.1}s\n",
        report.elapsed.as_secs_f64()
    ));

    out
}

/// Prints the end-of-run summary to stdout
pub fn print_summary(report: &CrawlReport) {
    print!("{}", format_summary(report));
}
