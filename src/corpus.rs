//! Labeled training corpus for the statistical model.
//!
//! The built-in corpus ships with the crate so the classifier is available
//! without any external data. Additional samples can be loaded from a JSON
//! file; when that file is unreadable the engine stays up in a degraded mode
//! on the built-in set rather than failing every request.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Ham,
    Spam,
}

/// One labeled example. Immutable once loaded; the model is built from a
/// snapshot of these and never sees later edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSample {
    pub label: Label,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
}

impl TrainingSample {
    fn new(label: Label, text: &str, sender: &str) -> Self {
        Self {
            label,
            text: text.to_string(),
            sender: Some(sender.to_string()),
        }
    }
}

/// Load extra samples from a JSON file: `[{"label": "spam", "text": "...",
/// "sender": "..."}, ...]`.
pub fn load_corpus(path: &Path) -> Result<Vec<TrainingSample>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read corpus file {}", path.display()))?;
    let samples: Vec<TrainingSample> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse corpus file {}", path.display()))?;
    Ok(samples)
}

/// Built-in corpus plus any samples from the optional external file. Errors
/// reading the file are logged and degrade to the built-in set.
pub fn load_with_builtin(extra: Option<&Path>) -> Vec<TrainingSample> {
    let mut samples = builtin_corpus();
    if let Some(path) = extra {
        match load_corpus(path) {
            Ok(loaded) => {
                log::info!("loaded {} corpus samples from {}", loaded.len(), path.display());
                samples.extend(loaded);
            }
            Err(e) => {
                log::warn!("corpus file unavailable, continuing with built-in set: {e:#}");
            }
        }
    }
    samples
}

/// The default labeled corpus: real-world spam/phishing shapes and ordinary
/// correspondence, each with a representative sender address.
pub fn builtin_corpus() -> Vec<TrainingSample> {
    use Label::{Ham, Spam};
    vec![
        TrainingSample::new(Spam, "URGENT VERIFICATION REQUIRED Click here to verify your account immediately before suspension", "noreply@security-alert.com"),
        TrainingSample::new(Spam, "Congratulations! You have won $1,000,000 in our international lottery. Claim your prize now!", "winner@lottery-prize.net"),
        TrainingSample::new(Spam, "Limited time offer: 90% discount on all products. Act now before this exclusive deal expires!", "deals@super-offers.biz"),
        TrainingSample::new(Spam, "Your account will be suspended unless you click this link immediately to update your information", "security@account-update.org"),
        TrainingSample::new(Spam, "Free gift cards available now. No purchase necessary. Click to claim your reward instantly!", "gifts@free-rewards.co"),
        TrainingSample::new(Spam, "FINAL NOTICE: Your package is ready for delivery. Update shipping information to avoid return", "delivery@package-notice.info"),
        TrainingSample::new(Spam, "Exclusive investment opportunity. Make money fast from home with our proven system!", "opportunity@quick-money.biz"),
        TrainingSample::new(Spam, "Your credit score needs immediate attention. Fix it now for free with our special program", "credit@score-fix.net"),
        TrainingSample::new(Spam, "Hot singles in your area want to meet you tonight. Click here to start chatting now", "singles@hot-dating.co"),
        TrainingSample::new(Spam, "Refund pending for your recent purchase. Click to process your refund of $299.99 immediately", "refunds@billing-center.org"),
        TrainingSample::new(Spam, "WARNING: Suspicious activity detected on your account. Verify identity now to prevent lock", "alert@security-warning.com"),
        TrainingSample::new(Spam, "You qualify for our special loan offer. Get cash fast with no credit check required!", "loans@instant-cash.biz"),
        TrainingSample::new(Spam, "Claim your inheritance of $2.5 million from a distant relative. Contact us immediately", "inheritance@legal-claims.net"),
        TrainingSample::new(Spam, "Your computer is infected! Download our antivirus software now to remove all threats", "support@virus-removal.co"),
        TrainingSample::new(Spam, "IRS NOTICE: You owe back taxes. Pay immediately to avoid legal action and penalties", "notices@irs-collection.org"),
        TrainingSample::new(Spam, "Netflix account suspended. Update payment method now to continue watching your shows", "account@netflx-billing.com"),
        TrainingSample::new(Spam, "Amazon delivery failed. Click here to reschedule delivery and avoid return to sender", "delivery@amazn-shipping.net"),
        TrainingSample::new(Spam, "PayPal security alert: Unusual activity detected. Confirm your identity within 24 hours", "security@paypa1-alerts.org"),
        TrainingSample::new(Spam, "Microsoft Windows license expires today. Renew now to avoid system shutdown", "licensing@microsft-support.com"),
        TrainingSample::new(Spam, "Apple ID locked due to suspicious activity. Unlock now by verifying your information", "security@app1e-support.co"),
        TrainingSample::new(Ham, "Hi there! Hope you are doing well. Let me know if you need anything from our team", "john.smith@company.com"),
        TrainingSample::new(Ham, "Meeting scheduled for tomorrow at 2 PM in conference room B. Please confirm attendance", "hr@enterprise.org"),
        TrainingSample::new(Ham, "Thanks for your email. I will get back to you shortly with the requested information", "support@legitimate-business.com"),
        TrainingSample::new(Ham, "Please find attached the document you requested yesterday. Let me know if you need anything else", "mary.johnson@university.edu"),
        TrainingSample::new(Ham, "Reminder: Your appointment is scheduled for Friday at 10 AM with Dr. Smith", "appointments@medicalcenter.org"),
        TrainingSample::new(Ham, "Could you please review the project proposal when you have time? Thanks in advance", "project.manager@tech-company.com"),
        TrainingSample::new(Ham, "Happy birthday! Hope you have a wonderful day filled with joy and celebration", "friends@birthday-club.org"),
        TrainingSample::new(Ham, "The quarterly report is now available on the company portal. Please review at your convenience", "reports@corporate.com"),
        TrainingSample::new(Ham, "Please confirm your attendance for the team building event next Thursday at 3 PM", "events@company-activities.org"),
        TrainingSample::new(Ham, "Thank you for your purchase. Your order will ship within 2 business days via standard delivery", "orders@retailstore.com"),
        TrainingSample::new(Ham, "Welcome to our newsletter! We send weekly updates about industry trends and company news", "newsletter@industry-insights.org"),
        TrainingSample::new(Ham, "Your subscription renewal is coming up next month. No action needed, it will auto-renew", "billing@subscription-service.com"),
        TrainingSample::new(Ham, "Flight confirmation: Your flight UA123 is scheduled to depart at 8:30 AM tomorrow", "confirmations@airline.com"),
        TrainingSample::new(Ham, "Hotel reservation confirmed for check-in on Friday. We look forward to your stay", "reservations@hotel-chain.com"),
        TrainingSample::new(Ham, "Password reset successful. If this was not you, please contact our support team immediately", "security@trusted-platform.com"),
        TrainingSample::new(Ham, "Your monthly statement is ready. You can view it in your online account dashboard", "statements@financial-institution.com"),
        TrainingSample::new(Ham, "Course reminder: Your online training session starts in 30 minutes. Join link attached", "training@education-platform.edu"),
        TrainingSample::new(Ham, "Weather alert: Rain expected in your area tomorrow. Plan accordingly for outdoor activities", "alerts@weather-service.gov"),
        TrainingSample::new(Ham, "Restaurant reservation confirmed for 7 PM tonight. Please arrive 10 minutes early", "reservations@fine-dining.com"),
        TrainingSample::new(Ham, "Library books due in 3 days. You can renew online or visit the library to extend loan period", "circulation@public-library.org"),
    ]
}
