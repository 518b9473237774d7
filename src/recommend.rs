//! User-facing guidance derived from the final classification. Pure lookup,
//! no side effects.

use crate::analyzers::StructuralAnalysis;
use crate::engine::Classification;

pub fn recommendations(
    classification: Classification,
    structure: &StructuralAnalysis,
) -> Vec<String> {
    let mut lines: Vec<String> = match classification {
        Classification::Spam => vec![
            "HIGH RISK: this email is likely spam or malicious".into(),
            "Do not click any links or download attachments".into(),
            "Delete this email immediately".into(),
            "Report to your IT security team if received at work".into(),
        ],
        Classification::Suspicious => vec![
            "SUSPICIOUS: proceed with extreme caution".into(),
            "Verify the sender before taking any action".into(),
            "Avoid clicking links or downloading files".into(),
        ],
        Classification::Questionable => vec![
            "QUESTIONABLE: exercise normal email caution".into(),
            "Verify any requests before responding".into(),
        ],
        Classification::Legitimate => vec![
            "Email appears legitimate".into(),
            "Normal email security practices apply".into(),
        ],
    };

    if structure.has_phishing_lookalike_domain
        && !matches!(classification, Classification::Legitimate)
    {
        lines.push("Mentions a well-known brand: verify authenticity through the official site".into());
    }

    lines
}
