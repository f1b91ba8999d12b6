// Heuristic résumé parser: free Markdown/plain text in, normalized document out.
// Pure and synchronous. No I/O, no shared state, no error type: unparseable
// lines simply fall through to the defaulting policy.

pub mod accumulator;
pub mod classifier;
pub mod defaults;
pub mod extract;
pub mod handlers;
pub mod model;
pub mod polish;

use tracing::debug;

pub use accumulator::{step, ParserState};
pub use model::ParsedResume;

/// Parses résumé text into a fully populated [`ParsedResume`].
pub fn parse_resume(text: &str) -> ParsedResume {
    let resume = text
        .split('\n')
        .fold(ParserState::default(), step)
        .finish();

    debug!(
        "Parsed résumé: experience={}, education={}, skills={}, projects={}, links={}",
        resume.experience.len(),
        resume.education.len(),
        resume.skills.len(),
        resume.projects.len(),
        resume.links.len()
    );

    resume
}
