//! Plain-text rendering of profiles and answers for the terminal.

use std::fmt;

use sitebrief_core::{AnswerResult, AnswerSource, CompanyProfile};

const NOT_FOUND: &str = "(none found)";

struct ProfileView<'a>(&'a CompanyProfile);

impl fmt::Display for ProfileView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let profile = self.0;

        writeln!(f, "# {}", profile.display_name())?;
        writeln!(f, "URL:      {}", profile.url())?;
        writeln!(f, "Title:    {}", profile.title().unwrap_or(NOT_FOUND))?;
        if let Some(at) = profile.analyzed_at() {
            writeln!(
                f,
                "Analyzed: {} ({} ms)",
                at.format("%Y-%m-%d %H:%M:%S UTC"),
                profile.elapsed_ms()
            )?;
        }

        writeln!(f, "\nPages:")?;
        for page in profile.pages_fetched() {
            writeln!(f, "  {:<8} {} [{}]", page.role, page.url, page.fetch_status)?;
        }

        writeln!(f, "\nEmails:")?;
        if profile.emails().is_empty() {
            writeln!(f, "  {NOT_FOUND}")?;
        }
        for email in profile.emails() {
            writeln!(f, "  {email}")?;
        }

        writeln!(f, "\nSocial links:")?;
        if profile.social_links().is_empty() {
            writeln!(f, "  {NOT_FOUND}")?;
        }
        for (platform, url) in profile.social_links() {
            writeln!(f, "  {platform:<10} {url}")?;
        }

        if let Some(summary) = profile.summary() {
            writeln!(f, "\nSummary:\n  {summary}")?;
        }

        writeln!(f, "\nAbout:")?;
        writeln!(f, "  {}", profile.about_text().unwrap_or(NOT_FOUND))
    }
}

struct AnswerView<'a> {
    profile: &'a CompanyProfile,
    result: &'a AnswerResult,
}

impl fmt::Display for AnswerView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result;

        writeln!(f, "Q ({}): {}", self.profile.display_name(), result.question)?;
        writeln!(f, "\n{}\n", result.answer)?;
        writeln!(f, "Source: {}", result.source)?;
        if !result.citations.is_empty() {
            writeln!(f, "Citations:")?;
            for url in &result.citations {
                writeln!(f, "  - {url}")?;
            }
        }
        writeln!(f, "\nNote: {}", AnswerSource::PROVENANCE_NOTE)
    }
}

pub(crate) fn render_profile(profile: &CompanyProfile) -> String {
    ProfileView(profile).to_string()
}

pub(crate) fn render_export(profile: &CompanyProfile) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&profile.export_row())
}

pub(crate) fn render_answer(profile: &CompanyProfile, result: &AnswerResult) -> String {
    AnswerView { profile, result }.to_string()
}
