//! Built-in rebrand rule table
//!
//! The ordered vocabulary migration from the retired palette naming to the
//! current one. Order is part of the table: later rules run on the output
//! of earlier rules.

use crate::rule::Rule;
use once_cell::sync::Lazy;

static REBRAND: Lazy<Vec<Rule>> = Lazy::new(build_rebrand_rules);

/// The full rebrand table, in application order
pub fn rebrand_rules() -> Vec<Rule> {
    REBRAND.clone()
}

fn build_rebrand_rules() -> Vec<Rule> {
    let mut rules = vec![
        // keywords
        Rule::literal("lightFlavor", "lightVariant"),
        Rule::literal("darkFlavor", "darkVariant"),
        Rule::literal("#catppuccin", "#evergarden"),
        // variant names, lowercase and capitalized
        Rule::literal("latte", "summer"),
        Rule::literal("Latte", "Summer"),
        Rule::literal("frappe", "spring"),
        Rule::literal("Frappé", "Spring"),
        Rule::literal("macchiato", "fall"),
        Rule::literal("Macchiato", "Fall"),
        Rule::literal("mocha", "winter"),
        Rule::literal("Mocha", "Winter"),
        Rule::var_token("flavor", "variant"),
    ];

    // color tokens
    for (from, to) in [
        ("rosewater", "cherry"),
        ("flamingo", "cherry"),
        ("mauve", "skye"),
        ("maroon", "red"),
        ("peach", "orange"),
        ("teal", "aqua"),
        ("sky", "skye"),
        ("sapphire", "snow"),
        ("lavender", "skye"),
    ] {
        rules.push(Rule::var_token(from, to));
    }

    // library
    rules.push(
        Rule::literal(
            r"https://userstyles\.catppuccin\.com/lib/lib\.less",
            "https://evergarden.moe/userstyles/lib/lib.less",
        )
        .with_label("library URL"),
    );

    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Patcher;
    use crate::observer::SilentObserver;
    use pretty_assertions::assert_eq;

    fn migrate(text: &str) -> String {
        Patcher::rebrand().apply(text, &mut SilentObserver).patched
    }

    #[test]
    fn test_table_size_and_order() {
        let rules = rebrand_rules();
        assert_eq!(rules.len(), 22);
        // keyword renames come before the bare variant names they contain
        assert_eq!(rules[0].label(), "lightFlavor");
        assert_eq!(rules[11].label(), "@flavor -> @variant");
        assert_eq!(rules[21].label(), "library URL");
    }

    #[test]
    fn test_keyword_renames() {
        assert_eq!(
            migrate("lightFlavor: latte; darkFlavor: mocha;"),
            "lightVariant: summer; darkVariant: winter;"
        );
    }

    #[test]
    fn test_marker_rename() {
        assert_eq!(migrate("#catppuccin()"), "#evergarden()");
    }

    #[test]
    fn test_variant_casing_pairs() {
        assert_eq!(migrate("frappe Frappé"), "spring Spring");
        assert_eq!(migrate("macchiato Macchiato"), "fall Fall");
        assert_eq!(migrate("latte Latte mocha Mocha"), "summer Summer winter Winter");
    }

    #[test]
    fn test_flavor_token() {
        assert_eq!(migrate("@flavor"), "@variant");
        assert_eq!(migrate("@{flavor}"), "@{variant}");
    }

    #[test]
    fn test_color_tokens() {
        assert_eq!(migrate("@rosewater @flamingo"), "@cherry @cherry");
        assert_eq!(migrate("@{mauve} @{lavender}"), "@{skye} @{skye}");
        assert_eq!(migrate("@maroon @peach"), "@red @orange");
        assert_eq!(migrate("@teal @sky @sapphire"), "@aqua @skye @snow");
    }

    #[test]
    fn test_color_tokens_whole_word_only() {
        // bare words without the marker are not color tokens
        assert_eq!(migrate("teal sky"), "teal sky");
        // longer identifiers are not split
        assert_eq!(migrate("@skyline"), "@skyline");
    }

    #[test]
    fn test_library_url() {
        assert_eq!(
            migrate("@import \"https://userstyles.catppuccin.com/lib/lib.less\";"),
            "@import \"https://evergarden.moe/userstyles/lib/lib.less\";"
        );
    }

    #[test]
    fn test_migrated_text_is_fixed_point() {
        let source = "\
lightFlavor: latte;
darkFlavor: mocha;
#catppuccin(@flavor);
color: @{rosewater};
accent: @mauve;
@import \"https://userstyles.catppuccin.com/lib/lib.less\";
";
        let once = migrate(source);
        let twice = migrate(&once);
        assert_eq!(once, twice);
    }
}
