use swatchbook::error::TokenError;
use swatchbook::{DesignSystem, StandardLuminance, Swatch};

fn main() -> Result<(), TokenError> {
    let accent = std::env::args()
        .nth(1)
        .and_then(|arg| swatchbook::parse_color(&arg))
        .map(Swatch::new);

    // 1. Create the design system
    let system = DesignSystem::new()?;
    let tokens = system.tokens();
    let root = system.root();

    for mode in [StandardLuminance::LightMode, StandardLuminance::DarkMode] {
        // 2. Configure it
        system.set_base_layer_luminance(root, mode);
        if let Some(ref accent) = accent {
            system.set(tokens.accent_color, root, accent.clone());
        }

        // 3. Use it
        println!("\n{:?}", mode);
        for (name, swatch) in [
            ("fill-color", system.get(tokens.fill_color, root)?),
            ("neutral-fill-rest", system.get(tokens.neutral_fill.rest, root)?),
            ("neutral-foreground-rest", system.get(tokens.neutral_foreground_rest, root)?),
            ("neutral-stroke-rest", system.get(tokens.neutral_stroke.rest, root)?),
            ("accent-fill-rest", system.get(tokens.accent_fill.rest, root)?),
            ("accent-fill-hover", system.get(tokens.accent_fill.hover, root)?),
            ("foreground-on-accent-rest", system.get(tokens.foreground_on_accent.rest, root)?),
            ("accent-foreground-rest", system.get(tokens.accent_foreground.rest, root)?),
            ("focus-stroke-outer", system.get(tokens.focus_stroke_outer, root)?),
        ] {
            println!("    {:<28}{}", name, swatch.to_css());
        }
    }

    Ok(())
}
