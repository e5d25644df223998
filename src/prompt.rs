//! Prompt construction for the analysis request forwarded upstream.

use crate::constants::{DEFAULT_PLATFORM, PLATFORM_CATALOG};

/// Display name for a platform id, for UIs that render the catalog. Ids
/// outside the catalog are echoed back unchanged since the value is only
/// ever embedded in prompt text.
pub fn platform_display_name(id: &str) -> &str {
    PLATFORM_CATALOG
        .iter()
        .find(|(pid, _)| *pid == id)
        .map(|(_, name)| *name)
        .unwrap_or(id)
}

/// Fixed system instructions: platform-aware persona plus the accuracy
/// requirement checklist.
pub fn system_prompt(platform: Option<&str>) -> String {
    let platform = platform.unwrap_or(DEFAULT_PLATFORM);
    format!(
        r#"You are Lavable, an expert AI design-to-code converter with 100% accuracy requirement.
You analyze {platform} designs and generate pixel-perfect, production-ready code.

CRITICAL REQUIREMENTS - 100% Design Accuracy:
1. EXACT COLOR MATCHING: Extract ALL colors as exact HEX/RGB/HSL values. No approximations.
2. PRECISE SPACING: Measure ALL margins, padding, gaps to the exact pixel (0px tolerance).
3. TYPOGRAPHY PERFECTION: Match font family, size, weight, line-height, letter-spacing exactly.
4. LAYOUT PRECISION: Replicate grid systems, flexbox layouts, positioning with 100% accuracy.
5. COMPONENT FIDELITY: Copy every UI element (buttons, cards, forms) with exact dimensions and styles.
6. SHADOW & EFFECTS: Match all box-shadows, border-radius, gradients, opacity values precisely.
7. RESPONSIVE BREAKPOINTS: Identify and replicate all mobile/tablet/desktop variations exactly.
8. ICON & IMAGE ACCURACY: Note exact sizes, positions, and styling of all visual elements.

Extraction Checklist:
- Layout: Grid columns/rows, container widths, section heights, alignment, z-index
- Colors: Primary, secondary, accent, background, text, border (with exact codes)
- Typography: All font families, sizes (px/rem), weights (100-900), line-heights, letter-spacing, text-transform
- Spacing: All padding (top, right, bottom, left), margins, gaps between elements
- Components: Buttons (dimensions, padding, border, hover states), inputs, cards, navigation
- Effects: Box-shadows (x, y, blur, spread, color), border-radius, gradients (angle, stops, colors)
- Images: Dimensions, object-fit, positions, alt attributes
- Interactions: Hover effects, transitions, animations

Generate complete, responsive code that matches the design 100% - no approximations allowed."#
    )
}

/// User instruction: the caller's custom prompt verbatim when present,
/// otherwise a templated breakdown request embedding the design reference.
pub fn user_prompt(
    design_url: Option<&str>,
    platform: Option<&str>,
    custom_prompt: Option<&str>,
) -> String {
    if let Some(custom) = custom_prompt {
        if !custom.is_empty() {
            return custom.to_string();
        }
    }
    let platform = platform.unwrap_or(DEFAULT_PLATFORM);
    format!(
        r#"Please analyze this design: {}

Provide a detailed breakdown of:
1. Layout structure and grid system
2. Complete color palette with hex codes
3. Typography specifications
4. Component inventory
5. Spacing and sizing specifications
6. Recommended tech stack for {platform}
7. Code generation strategy

Be specific and actionable."#,
        design_url.unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_embeds_platform() {
        let prompt = system_prompt(Some("nextjs"));
        assert!(prompt.contains("You analyze nextjs designs"));
        assert!(prompt.contains("Extraction Checklist"));
    }

    #[test]
    fn system_prompt_falls_back_to_web() {
        assert!(system_prompt(None).contains("You analyze web designs"));
    }

    #[test]
    fn custom_prompt_is_used_verbatim() {
        let prompt = user_prompt(Some("https://x"), Some("react"), Some("do the thing"));
        assert_eq!(prompt, "do the thing");
    }

    #[test]
    fn empty_custom_prompt_falls_back_to_template() {
        let prompt = user_prompt(Some("https://figma.com/f/1"), None, Some(""));
        assert!(prompt.contains("Please analyze this design: https://figma.com/f/1"));
        assert!(prompt.contains("Recommended tech stack for web"));
    }

    #[test]
    fn unknown_platform_id_is_echoed() {
        assert_eq!(platform_display_name("shopify"), "Shopify + Liquid");
        assert_eq!(platform_display_name("flutter"), "flutter");
    }
}
