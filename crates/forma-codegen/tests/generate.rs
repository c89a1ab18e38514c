//! End-to-end generation tests.
//!
//! Each test builds a design tree (or loads one from a temporary export),
//! runs the full pipeline and inspects the generated file map.

use forma_codegen::{generate, GeneratedFiles, GeneratorConfig, OutputDialectKind};
use forma_core::{Color, DesignNode, DesignSource, JsonFileSource, LayoutMode, NodeType};
use proptest::prelude::*;

fn text(id: &str, name: &str, chars: &str) -> DesignNode {
    DesignNode::new(id, NodeType::Text)
        .with_name(name)
        .with_text(chars)
}

fn white() -> Color {
    Color::rgb(1.0, 1.0, 1.0)
}

fn file<'f>(files: &'f GeneratedFiles, path: &str) -> &'f str {
    files
        .get(path)
        .map(String::as_str)
        .unwrap_or_else(|| panic!("missing {}; have {:?}", path, files.keys().collect::<Vec<_>>()))
}

fn login() -> DesignNode {
    DesignNode::new("1:1", NodeType::Frame)
        .with_name("Login")
        .with_bounds(0.0, 0.0, 400.0, 300.0)
        .with_fill(white())
        .with_layout(LayoutMode::Vertical)
        .with_padding(24.0)
        .with_child(text("1:2", "Title", "Welcome back").with_bounds(24.0, 24.0, 352.0, 32.0))
        .with_child(
            DesignNode::new("1:3", NodeType::Frame)
                .with_name("Search Input")
                .with_bounds(24.0, 72.0, 352.0, 40.0)
                .with_stroke(Color::rgb(0.8, 0.8, 0.8), 1.0)
                .with_corner_radius(8.0),
        )
        .with_child(
            DesignNode::new("1:4", NodeType::Frame)
                .with_name("Submit Button")
                .with_bounds(24.0, 128.0, 352.0, 40.0)
                .with_fill(Color::rgb(0.0, 0.4, 1.0))
                .with_corner_radius(8.0)
                .with_child(
                    text("1:5", "Label", "Sign in")
                        .with_bounds(170.0, 138.0, 60.0, 20.0)
                        .with_fill(white()),
                ),
        )
}

fn shop() -> DesignNode {
    DesignNode::new("root", NodeType::Frame)
        .with_name("Shop")
        .with_fill(white())
        .with_child(
            DesignNode::new("c", NodeType::Frame)
                .with_name("Product Card")
                .with_fill(Color::rgb(0.95, 0.95, 0.95))
                .with_child(text("c1", "Price", "$10"))
                .with_child(DesignNode::new("c2", NodeType::Frame).with_name("Buy Button")),
        )
        .with_child(text("t", "Footnote", "Prices include tax"))
}

// =============================================================================
// React output
// =============================================================================

#[test]
fn test_login_component_source() {
    let files = generate(&login(), &GeneratorConfig::new()).unwrap();

    assert_eq!(
        files.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["Login/Login.tsx", "Login/Login.css", "Login/Login.types.ts"]
    );
    assert_eq!(
        file(&files, "Login/Login.tsx"),
        r#"import React, { useState } from 'react';
import type { LoginProps } from './Login.types';
import './Login.css';

export const Login: React.FC<LoginProps> = () => {
  const [searchInput, setSearchInput] = useState<string>('');

  const handleSearchInputChange = (event: React.ChangeEvent<HTMLInputElement>) => {
    setSearchInput(event.target.value);
  };

  const handleSubmitButtonClick = () => {};

  return (
    <div className="login">
      <p className="title">Welcome back</p>
      <input className="search-input" type="text" value={searchInput} onChange={handleSearchInputChange} />
      <button className="submit-button" type="button" onClick={handleSubmitButtonClick}>
        <p className="label">Sign in</p>
      </button>
    </div>
  );
};

export default Login;
"#
    );
}

#[test]
fn test_login_stylesheet() {
    let files = generate(&login(), &GeneratorConfig::new()).unwrap();
    let css = file(&files, "Login/Login.css");

    assert!(css.starts_with("/* Login styles */\n"));
    assert!(css.contains(
        ".login {\n  box-sizing: border-box;\n  background-color: #ffffff;\n  padding: var(--spacing-lg);\n  display: flex;\n  flex-direction: column;\n}\n"
    ));
    assert!(css.contains(
        ".search-input {\n  box-sizing: border-box;\n  border: 1px solid #cccccc;\n  border-radius: var(--radius-md);\n}\n"
    ));
    assert!(css.contains(".label {\n  width: 60px;\n  height: 20px;\n  color: #ffffff;\n"));
}

#[test]
fn test_login_type_declarations() {
    let files = generate(&login(), &GeneratorConfig::new()).unwrap();
    let types = file(&files, "Login/Login.types.ts");

    assert!(types.contains("export interface LoginState {\n  searchInput: string;\n}"));
    assert!(types.contains(
        "  handleSearchInputChange: (event: ChangeEvent<HTMLInputElement>) => void;\n"
    ));
    assert!(types.contains("  handleSubmitButtonClick: () => void;\n"));
}

#[test]
fn test_untyped_output() {
    let files = generate(&login(), &GeneratorConfig::new().with_typed(false)).unwrap();

    assert_eq!(
        files.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["Login/Login.jsx", "Login/Login.css"]
    );
    let source = file(&files, "Login/Login.jsx");
    assert!(source.contains("export const Login = () => {"));
    assert!(source.contains("useState('')"));
    assert!(!source.contains("import type"));
}

// =============================================================================
// Boundaries
// =============================================================================

#[test]
fn test_boundary_becomes_sub_component() {
    let files = generate(&shop(), &GeneratorConfig::new()).unwrap();

    let root = file(&files, "Shop/Shop.tsx");
    assert!(root.contains("import { ProductCard } from '../ProductCard/ProductCard';"));
    assert!(root.contains("      <ProductCard className=\"product-card\" />"));
    assert!(!root.contains("className=\"buy-button\""));
    assert!(root.contains("export default Shop;"));

    let card = file(&files, "ProductCard/ProductCard.tsx");
    assert!(card.contains("const handleBuyButtonClick = () => {};"));
    assert!(card.contains("<p className=\"price\">$10</p>"));
    assert!(!card.contains("export default"));
}

#[test]
fn test_repeated_structure_boundary() {
    let photo = |id: &str, name: &str| {
        DesignNode::new(id, NodeType::Rectangle)
            .with_name(name)
            .with_bounds(0.0, 0.0, 80.0, 80.0)
            .with_child(DesignNode::new(format!("{}-a", id), NodeType::Vector))
            .with_child(DesignNode::new(format!("{}-b", id), NodeType::Vector))
    };
    let root = DesignNode::new("root", NodeType::Frame)
        .with_name("Page")
        .with_fill(white())
        .with_child(
            DesignNode::new("g", NodeType::Frame)
                .with_name("Gallery")
                .with_child(photo("p1", "Photo One"))
                .with_child(photo("p2", "Photo Two"))
                .with_child(text("cap", "Caption", "Summer")),
        );

    let files = generate(&root, &GeneratorConfig::new()).unwrap();

    let page = file(&files, "Page/Page.tsx");
    assert!(page.contains("<Gallery className=\"gallery\" />"));
    assert!(!page.contains("photo-one"));

    let gallery = file(&files, "Gallery/Gallery.tsx");
    assert!(gallery.contains("<div className=\"photo-one\"></div>"));
    assert!(gallery.contains("<p className=\"caption\">Summer</p>"));
}

#[test]
fn test_self_reference_renders_inline() {
    let files = generate(&shop(), &GeneratorConfig::new()).unwrap();
    let card = file(&files, "ProductCard/ProductCard.tsx");

    assert!(!card.contains("<ProductCard"));
    assert!(!card.contains("import { ProductCard }"));
    assert!(card.contains("    <div className=\"product-card\">"));
}

#[test]
fn test_unreferenced_boundary_not_generated() {
    // The only child is a boundary, but its parent collapses to the text of
    // a single text child first, so the card is never referenced.
    let root = DesignNode::new("root", NodeType::Frame)
        .with_name("Page")
        .with_fill(white())
        .with_child(
            DesignNode::new("v", NodeType::Vector)
                .with_name("Glyph")
                .with_child(text("card", "Card title", "Hello")),
        );

    let files = generate(&root, &GeneratorConfig::new()).unwrap();
    assert!(files.keys().all(|path| path.starts_with("Page/")));
    assert!(file(&files, "Page/Page.tsx").contains("      Hello\n"));
}

#[test]
fn test_unnamed_boundaries_keep_their_own_content() {
    let root = DesignNode::new("root", NodeType::Frame)
        .with_name("Page")
        .with_fill(white())
        .with_child(DesignNode::new("a", NodeType::Instance).with_child(
            DesignNode::new("a1", NodeType::Text).with_text("Alpha"),
        ))
        .with_child(DesignNode::new("b", NodeType::Instance).with_child(
            DesignNode::new("b1", NodeType::Text).with_text("Beta"),
        ));

    let files = generate(&root, &GeneratorConfig::new()).unwrap();

    let page = file(&files, "Page/Page.tsx");
    assert!(page.contains("<Component1 className=\"item\" />"));
    assert!(page.contains("<Component2 className=\"item\" />"));

    let first = file(&files, "Component1/Component1.tsx");
    assert!(first.contains("      Alpha\n"));

    let second = file(&files, "Component2/Component2.tsx");
    assert!(second.contains("      Beta\n"));
    assert!(!second.contains("Component1"));
}

#[test]
fn test_text_root_becomes_fragment() {
    let root = DesignNode::new("root", NodeType::Component)
        .with_name("Badge")
        .with_child(DesignNode::new("t", NodeType::Text).with_text("New item"));

    let files = generate(&root, &GeneratorConfig::new()).unwrap();
    assert!(file(&files, "Badge/Badge.tsx")
        .contains("  return (\n    <>\n      New item\n    </>\n  );\n"));
}

#[test]
fn test_empty_root_returns_null() {
    let root = DesignNode::new("root", NodeType::Rectangle).with_name("Spacer");

    let files = generate(&root, &GeneratorConfig::new()).unwrap();
    assert!(file(&files, "Spacer/Spacer.tsx").contains("  return (\n    null\n  );\n"));
}

#[test]
fn test_componentize_disabled_produces_one_unit() {
    let files = generate(&shop(), &GeneratorConfig::new().with_componentize(false)).unwrap();

    assert!(files.keys().all(|path| path.starts_with("Shop/")));
    let root = file(&files, "Shop/Shop.tsx");
    assert!(root.contains("<div className=\"product-card\">"));
    assert!(root.contains("handleBuyButtonClick"));
}

#[test]
fn test_wrapper_elided_to_descendant_depth() {
    let root = DesignNode::new("root", NodeType::Frame)
        .with_name("Hero")
        .with_fill(white())
        .with_child(
            DesignNode::new("w", NodeType::Group)
                .with_child(DesignNode::new("w2", NodeType::Frame).with_child(text("h", "Headline", "Hi"))),
        );

    let files = generate(&root, &GeneratorConfig::new()).unwrap();
    assert!(file(&files, "Hero/Hero.tsx").contains(
        "    <div className=\"hero\">\n      <p className=\"headline\">Hi</p>\n    </div>\n"
    ));
}

// =============================================================================
// State shape
// =============================================================================

fn form_with_inputs(names: &[&str]) -> DesignNode {
    let mut root = DesignNode::new("root", NodeType::Frame)
        .with_name("Signup")
        .with_fill(white());
    for (i, name) in names.iter().enumerate() {
        root = root.with_child(
            DesignNode::new(format!("i{}", i), NodeType::Frame)
                .with_name(*name)
                .with_bounds(0.0, i as f64 * 48.0, 200.0, 40.0),
        );
    }
    root
}

#[test]
fn test_three_states_stay_independent() {
    let root = form_with_inputs(&["Name Input", "Mail Input", "Phone Input"]);
    let files = generate(&root, &GeneratorConfig::new()).unwrap();
    let source = file(&files, "Signup/Signup.tsx");

    assert!(source.contains("const [nameInput, setNameInput] = useState<string>('');"));
    assert!(source.contains("value={phoneInput}"));
    assert!(!source.contains("setState"));
    assert!(!source.contains("useCallback"));
}

#[test]
fn test_four_states_aggregate() {
    let root = form_with_inputs(&["Name Input", "Mail Input", "Phone Input", "City Input"]);
    let files = generate(&root, &GeneratorConfig::new()).unwrap();
    let source = file(&files, "Signup/Signup.tsx");

    assert!(source.contains("import React, { useCallback, useState } from 'react';"));
    assert!(source.contains("import type { SignupProps, SignupState } from './Signup.types';"));
    assert!(source.contains("const [state, setState] = useState<SignupState>({"));
    assert!(source.contains("value={state.cityInput}"));
    assert!(source.contains("setState((prev) => ({ ...prev, nameInput: event.target.value }));"));
}

// =============================================================================
// Stylesheet dedup
// =============================================================================

#[test]
fn test_identical_styles_share_one_rule() {
    let tile = |id: &str, name: &str| {
        DesignNode::new(id, NodeType::Rectangle)
            .with_name(name)
            .with_bounds(0.0, 0.0, 100.0, 100.0)
            .with_fill(Color::rgb(0.2, 0.2, 0.2))
            .with_corner_radius(12.0)
    };
    let root = DesignNode::new("root", NodeType::Frame)
        .with_name("Board")
        .with_fill(white())
        .with_child(tile("a", "Left Tile"))
        .with_child(tile("b", "Right Tile"));

    let files = generate(&root, &GeneratorConfig::new()).unwrap();
    let css = file(&files, "Board/Board.css");
    assert!(css.contains(".left-tile, .right-tile {\n"));
    assert_eq!(css.matches("var(--radius-lg)").count(), 1);
}

#[test]
fn test_css_framework_recorded() {
    let files = generate(&login(), &GeneratorConfig::new().with_css_framework("tailwind")).unwrap();
    assert!(file(&files, "Login/Login.css").contains("/* css framework: tailwind */"));
}

// =============================================================================
// Other dialects
// =============================================================================

#[test]
fn test_vue_output() {
    let config = GeneratorConfig::new().with_dialect(OutputDialectKind::Vue);
    let files = generate(&shop(), &config).unwrap();

    let root = file(&files, "Shop/Shop.vue");
    assert!(root.contains("import ProductCard from '../ProductCard/ProductCard.vue';"));
    assert!(root.contains("  <div class=\"shop\">"));
    assert!(root.contains("<ProductCard class=\"product-card\" />"));

    let card = file(&files, "ProductCard/ProductCard.vue");
    assert!(card.contains("@click=\"handleBuyButtonClick\""));
    assert!(files.contains_key("ProductCard/ProductCard.css"));
}

#[test]
fn test_html_output_is_flat() {
    let config = GeneratorConfig::new().with_dialect(OutputDialectKind::Html);
    let files = generate(&shop(), &config).unwrap();

    assert_eq!(
        files.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["Shop/index.html", "Shop/Shop.css"]
    );
    let page = file(&files, "Shop/index.html");
    assert!(page.contains("<div class=\"product-card\">"));
    assert!(page.contains("<button class=\"buy-button\" type=\"button\"></button>"));
    assert!(!page.contains("onClick"));
}

// =============================================================================
// Sources and determinism
// =============================================================================

#[test]
fn test_generate_from_exported_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("doc.json"),
        r#"{
            "nodes": {
                "2:1": {
                    "document": {
                        "id": "2:1",
                        "name": "Settings",
                        "type": "FRAME",
                        "absoluteBoundingBox": { "x": 0, "y": 0, "width": 320, "height": 200 },
                        "fills": [{ "type": "SOLID", "color": { "r": 1, "g": 1, "b": 1, "a": 1 } }],
                        "children": [
                            {
                                "id": "2:2",
                                "name": "Dark Mode Switch",
                                "type": "INSTANCE",
                                "absoluteBoundingBox": { "x": 16, "y": 16, "width": 40, "height": 24 },
                                "fills": [{ "type": "SOLID", "visible": false, "color": { "r": 0, "g": 0, "b": 0 } }]
                            }
                        ]
                    }
                }
            }
        }"#,
    )
    .unwrap();

    let source = JsonFileSource::new(dir.path());
    let document = source.fetch_document("doc", Some("2:1")).unwrap();
    let files = generate(&document, &GeneratorConfig::new()).unwrap();

    let settings = file(&files, "Settings/Settings.tsx");
    assert!(settings.contains("<DarkModeSwitch className=\"dark-mode-switch\" />"));

    let switch = file(&files, "DarkModeSwitch/DarkModeSwitch.tsx");
    assert!(switch.contains("const [darkModeSwitch, setDarkModeSwitch] = useState<boolean>(false);"));
    assert!(switch.contains("setDarkModeSwitch((prev) => !prev);"));
    assert!(switch.contains("onClick={handleDarkModeSwitchToggle}"));

    // The hidden fill was dropped during normalization.
    assert!(!file(&files, "DarkModeSwitch/DarkModeSwitch.css").contains("background-color"));
}

#[test]
fn test_repeated_generation_is_identical() {
    let config = GeneratorConfig::new();
    assert_eq!(
        generate(&shop(), &config).unwrap(),
        generate(&shop(), &config).unwrap()
    );
}

proptest! {
    #[test]
    fn generation_is_deterministic(names in proptest::collection::vec("[A-Za-z][A-Za-z ]{0,11}", 1..6)) {
        let mut root = DesignNode::new("root", NodeType::Frame)
            .with_name("Screen")
            .with_fill(white());
        for (i, name) in names.iter().enumerate() {
            root = root.with_child(
                DesignNode::new(format!("n{}", i), NodeType::Frame)
                    .with_name(name.clone())
                    .with_bounds(0.0, i as f64 * 50.0, 100.0, 40.0),
            );
        }

        let config = GeneratorConfig::new();
        let first = generate(&root, &config).unwrap();
        let second = generate(&root, &config).unwrap();
        prop_assert_eq!(first, second);
    }
}
