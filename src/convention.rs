//! De-facto convention inference
//!
//! Picks a one-line headline from the naming ratios. The rules are a
//! simple "winner takes most" ladder, checked in order.

use crate::classify::{NamingModel, NamingRule};
use crate::metrics::ratio;
use crate::models::ConventionSummary;

const CAMEL_DOMINANT: f64 = 0.60;
const PREFIX_RARE: f64 = 0.30;
const UNDERSCORE_RARE: f64 = 0.20;
const PREFIX_DOMINANT: f64 = 0.50;
const UNDERSCORE_COMMON: f64 = 0.40;

pub fn infer_convention(naming: &NamingModel) -> ConventionSummary {
    let total = naming.total();
    if total == 0 {
        return ConventionSummary {
            headline: "No test methods detected".to_string(),
            rationale: "No identifiers of the analyzed population were supplied.".to_string(),
        };
    }

    let camel = ratio(naming.count(NamingRule::CamelCase), total);
    let prefix = ratio(naming.count(NamingRule::StartsWithPrefix), total);
    let underscore = ratio(naming.count(NamingRule::ContainsUnderscore), total);
    let annotation = ratio(naming.count(NamingRule::DisplayAnnotation), total);

    let headline = if camel >= CAMEL_DOMINANT && prefix < PREFIX_RARE && underscore < UNDERSCORE_RARE {
        "lowerCamelCase method names, no 'test' prefix, minimal underscores"
    } else if prefix >= PREFIX_DOMINANT {
        "Legacy 'test' prefix style is dominant"
    } else if underscore >= UNDERSCORE_COMMON {
        "Underscore-based naming (snake-ish) is common"
    } else {
        "Mixed naming conventions"
    };

    let rationale = format!(
        "camel-like: {:.1}%, startsWith prefix: {:.1}%, underscores: {:.1}%, annotation: {:.1}%",
        camel * 100.0,
        prefix * 100.0,
        underscore * 100.0,
        annotation * 100.0
    );

    ConventionSummary {
        headline: headline.to_string(),
        rationale,
    }
}
