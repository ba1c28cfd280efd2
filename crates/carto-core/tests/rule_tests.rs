//! Declaration validation and serialization against the property reference

use carto_core::{
    Color, CompilerConfig, Diagnostic, DiagnosticCode, Dimension, Env, Field, ImageFilter,
    FontSet, Keyword, Node, Quoted, ReferenceSchema, Rule, Severity, StyleTree, Value, Variable,
};

fn schema() -> ReferenceSchema {
    ReferenceSchema::from_json(include_str!("fixtures/reference.json")).unwrap()
}

fn value(components: Vec<Node>) -> Value {
    Value::new(components)
}

/// Validate and serialize one free-standing declaration
fn serialize(
    name: &str,
    components: Vec<Node>,
    config: CompilerConfig,
) -> (String, Vec<Diagnostic>) {
    let schema = schema();
    let tree = StyleTree::new();
    let mut env = Env::with_config(&tree, &schema, config);
    let rule = Rule::new(name, value(components), 0, None, &schema);
    let text = rule.to_xml(&mut env, false, None);
    (text, env.into_diagnostics())
}

fn messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.message.as_str()).collect()
}

#[test]
fn test_plain_attributes() {
    let (text, diagnostics) = serialize(
        "line-width",
        vec![Dimension::new(2.5).into()],
        CompilerConfig::default(),
    );
    assert_eq!(text, r#"stroke-width="2.5""#);
    assert!(diagnostics.is_empty());

    let (text, _) = serialize(
        "line-color",
        vec![Color::rgb(255, 0, 0).into()],
        CompilerConfig::default(),
    );
    assert_eq!(text, r##"stroke="#ff0000""##);

    let (text, _) = serialize(
        "line-cap",
        vec![Keyword::new("round").into()],
        CompilerConfig::default(),
    );
    assert_eq!(text, r#"stroke-linecap="round""#);
}

#[test]
fn test_unrecognized_rule_with_suggestion() {
    let (text, diagnostics) = serialize(
        "lne-width",
        vec![Dimension::new(1.0).into()],
        CompilerConfig::default(),
    );
    assert_eq!(text, "");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::UnrecognizedRule);
    assert_eq!(
        diagnostics[0].message,
        "Unrecognized rule: lne-width. Did you mean line-width?"
    );
    assert_eq!(diagnostics[0].suggestions[0].replacement, "line-width");
}

#[test]
fn test_unrecognized_rule_without_close_match() {
    let (_, diagnostics) = serialize(
        "xyzzy",
        vec![Dimension::new(1.0).into()],
        CompilerConfig::default(),
    );
    assert_eq!(messages(&diagnostics), vec!["Unrecognized rule: xyzzy"]);
    assert!(diagnostics[0].suggestions.is_empty());
}

#[test]
fn test_suggestion_distance_from_config() {
    let config = CompilerConfig {
        suggestion_distance: 1,
        ..CompilerConfig::default()
    };
    let (_, diagnostics) = serialize("lne-width", vec![Dimension::new(1.0).into()], config);
    assert_eq!(messages(&diagnostics), vec!["Unrecognized rule: lne-width"]);
}

#[test]
fn test_status_warnings_keep_rule_valid() {
    let (text, diagnostics) = serialize(
        "line-rasterizer",
        vec![Keyword::new("fast").into()],
        CompilerConfig::default(),
    );
    assert_eq!(text, r#"rasterizer="fast""#);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(
        diagnostics[0].message,
        "line-rasterizer is deprecated. It may be removed in the future."
    );

    let (_, diagnostics) = serialize(
        "line-smooth",
        vec![Dimension::new(0.5).into()],
        CompilerConfig::default(),
    );
    assert_eq!(
        messages(&diagnostics),
        vec!["line-smooth is experimental. It may change, be renamed or removed in the future."]
    );

    let (text, diagnostics) = serialize(
        "line-offset",
        vec![Dimension::new(1.0).into()],
        CompilerConfig::default().quiet(true),
    );
    assert_eq!(text, r#"offset="1""#);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_invalid_values() {
    let (text, diagnostics) = serialize(
        "line-width",
        vec![Keyword::new("round").into()],
        CompilerConfig::default(),
    );
    assert_eq!(text, "");
    assert_eq!(
        messages(&diagnostics),
        vec!["Invalid value for line-width, the type float is expected. round (of type keyword) was given."]
    );

    let (_, diagnostics) = serialize(
        "line-cap",
        vec![Dimension::new(2.0).into()],
        CompilerConfig::default(),
    );
    assert_eq!(
        messages(&diagnostics),
        vec![
            "Invalid value for line-cap, the type keyword (options: butt, round, square) is expected. 2 (of type float) was given."
        ]
    );
}

#[test]
fn test_numbers_and_unsigned() {
    let (text, _) = serialize(
        "line-dasharray",
        vec![Dimension::new(2.0).into(), Dimension::new(4.0).into()],
        CompilerConfig::default(),
    );
    assert_eq!(text, r#"stroke-dasharray="2, 4""#);

    let (text, diagnostics) = serialize(
        "line-dasharray",
        vec![Dimension::new(2.0).into(), Quoted::new("x").into()],
        CompilerConfig::default(),
    );
    assert_eq!(text, "");
    assert!(diagnostics.iter().any(Diagnostic::is_error));

    let (text, _) = serialize(
        "marker-max-error",
        vec![Dimension::new(0.2).into()],
        CompilerConfig::default(),
    );
    assert_eq!(text, r#"max-error="0.2""#);

    let (text, _) = serialize(
        "marker-max-error",
        vec![Dimension::new(-1.0).into()],
        CompilerConfig::default(),
    );
    assert_eq!(text, "");
}

#[test]
fn test_image_filter_functions() {
    let blur = ImageFilter::new(
        "agg-stack-blur",
        Some(vec![Dimension::new(2.0).into(), Dimension::new(2.0).into()]),
    );
    let (text, diagnostics) = serialize(
        "image-filters",
        vec![blur.into(), ImageFilter::new("gray", None).into()],
        CompilerConfig::default(),
    );
    assert_eq!(text, r#"image-filters="agg-stack-blur(2,2), gray""#);
    assert!(diagnostics.is_empty());

    let wrong_arity = ImageFilter::new("agg-stack-blur", Some(vec![Dimension::new(2.0).into()]));
    let (text, _) = serialize(
        "image-filters",
        vec![wrong_arity.into()],
        CompilerConfig::default(),
    );
    assert_eq!(text, "");

    let any_arity = ImageFilter::new(
        "scale-hsla",
        Some((0..8).map(|_| Dimension::new(0.0).into()).collect()),
    );
    let (text, _) = serialize(
        "image-filters",
        vec![any_arity.into()],
        CompilerConfig::default(),
    );
    assert!(text.starts_with("image-filters=\"scale-hsla("));
}

#[test]
fn test_expression_properties_accept_fields() {
    let (text, diagnostics) = serialize(
        "text-name",
        vec![Field::new("name").into()],
        CompilerConfig::default(),
    );
    assert_eq!(text, r#"name="[name]""#);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_fonts() {
    let config = CompilerConfig::default().with_fonts(["DejaVu Sans Book"]);

    let (text, _) = serialize(
        "text-face-name",
        vec![Quoted::new("DejaVu Sans Book").into()],
        config.clone(),
    );
    assert_eq!(text, r#"face-name="DejaVu Sans Book""#);

    let (text, diagnostics) = serialize(
        "text-face-name",
        vec![Quoted::new("Comic Sans").into()],
        config,
    );
    assert_eq!(text, "");
    assert_eq!(diagnostics[0].code, DiagnosticCode::UnknownFont);
    assert_eq!(
        diagnostics[0].message,
        "The font 'Comic Sans' (specified as text-face-name) is not a known font on your system, please provide an existing font face name."
    );
}

#[test]
fn test_font_stack_registers_fontset() {
    let stack = || -> Vec<Node> {
        vec![
            Quoted::new("Open Sans Regular").into(),
            Quoted::new("DejaVu Sans Book").into(),
        ]
    };
    let schema = schema();
    let tree = StyleTree::new();
    let mut env = Env::new(&tree, &schema);

    let first = Rule::new("text-face-name", value(stack()), 0, None, &schema);
    let second = Rule::new("text-face-name", value(stack()), 1, None, &schema);
    assert_eq!(first.to_xml(&mut env, false, None), r#"fontset-name="fontset-0""#);
    assert_eq!(second.to_xml(&mut env, false, None), r#"fontset-name="fontset-0""#);

    assert_eq!(env.fontsets().len(), 1);
    insta::assert_snapshot!(env.fontsets().fontsets()[0].to_xml(), @r#"
    <FontSet name="fontset-0">
      <Font face-name="Open Sans Regular"/>
      <Font face-name="DejaVu Sans Book"/>
    </FontSet>
    "#);
}

#[test]
fn test_content_mode() {
    let schema = schema();
    let tree = StyleTree::new();
    let mut env = Env::new(&tree, &schema);
    let rule = Rule::new(
        "line-dasharray",
        value(vec![Dimension::new(5.0).into(), Dimension::new(2.5).into()]),
        0,
        None,
        &schema,
    );

    assert_eq!(rule.to_xml(&mut env, true, None), "5, 2.5");
    assert_eq!(rule.to_xml(&mut env, true, Some(",")), "5,2.5");
}

#[test]
fn test_variables_serialize_to_nothing() {
    let schema = schema();
    let tree = StyleTree::new();
    let mut env = Env::new(&tree, &schema);
    let rule = Rule::variable("@w", value(vec![Dimension::new(1.0).into()]), 0, None);

    assert!(rule.validate(&mut env));
    assert_eq!(rule.to_xml(&mut env, false, None), "");
    assert!(env.diagnostics().is_empty());
}

#[test]
fn test_ev_leaves_original_untouched() {
    let schema = schema();
    let mut tree = StyleTree::new();
    tree.add_rule(Rule::variable("@w", value(vec![Dimension::new(3.0).into()]), 0, None), None);
    let width = tree.add_rule(
        Rule::new(
            "casing/line-width",
            value(vec![Variable::new("@w", 1, None).into()]),
            1,
            Some("roads.mss"),
            &schema,
        ),
        None,
    );

    let mut env = Env::new(&tree, &schema);
    env.push_global_frames();
    let original = tree.rule(width);
    let evaluated = original.ev(&mut env);

    assert_eq!(evaluated.value.to_text(), "3");
    assert_eq!(original.value.to_text(), "@w");
    assert_eq!(evaluated.instance, "casing");
    assert_eq!(evaluated.name, "line-width");
    assert_eq!(evaluated.filename.as_deref(), Some("roads.mss"));
    assert_eq!(evaluated.symbolizer.as_deref(), Some("line"));
    assert_eq!(evaluated.to_xml(&mut env, false, None), r#"stroke-width="3""#);
}

#[test]
fn test_undefined_value_reported_once() {
    let schema = schema();
    let mut tree = StyleTree::new();
    let width = tree.add_rule(
        Rule::new("line-width", value(vec![Variable::new("@nope", 0, None).into()]), 0, None, &schema),
        None,
    );
    let mut env = Env::new(&tree, &schema);
    let evaluated = tree.rule(width).ev(&mut env);

    assert!(evaluated.validate(&mut env));
    assert_eq!(env.diagnostics().len(), 1);
}

#[test]
fn test_diagnostic_listing() {
    let schema = schema();
    let tree = StyleTree::new();
    let mut env = Env::new(&tree, &schema);

    let rules = [
        Rule::new("lne-width", value(vec![Dimension::new(1.0).into()]), 10, None, &schema),
        Rule::new("line-offset", value(vec![Dimension::new(1.0).into()]), 20, None, &schema),
        Rule::new("line-cap", value(vec![Keyword::new("pointy").into()]), 30, Some("a.mss"), &schema),
    ];
    for rule in &rules {
        let _ = rule.to_xml(&mut env, false, None);
    }

    let listing: Vec<String> = env
        .diagnostics()
        .diagnostics()
        .iter()
        .map(ToString::to_string)
        .collect();
    insta::assert_snapshot!(listing.join("\n"), @r"
    error[unrecognized-rule]: Unrecognized rule: lne-width. Did you mean line-width? (<input>:10)
    warning[unstable-property]: line-offset is unstable. It may change in the future. (<input>:20)
    error[invalid-value]: Invalid value for line-cap, the type keyword (options: butt, round, square) is expected. pointy (of type keyword) was given. (a.mss:30)
    ");
}

/// Evaluate and serialize `name: @list` where `@list` is a global list
fn serialize_through_variable(
    name: &str,
    list: Vec<Node>,
    config: CompilerConfig,
) -> (String, Vec<FontSet>, Vec<Diagnostic>) {
    let schema = schema();
    let mut tree = StyleTree::new();
    tree.add_rule(Rule::variable("@list", value(list), 0, None), None);
    let rule = tree.add_rule(
        Rule::new(name, value(vec![Variable::new("@list", 1, None).into()]), 1, None, &schema),
        None,
    );

    let mut env = Env::with_config(&tree, &schema, config);
    env.push_global_frames();
    let evaluated = tree.rule(rule).ev(&mut env);
    assert_eq!(evaluated.value.len(), 2);
    let text = evaluated.to_xml(&mut env, false, None);
    let fontsets = env.fontsets().fontsets().to_vec();
    (text, fontsets, env.into_diagnostics())
}

#[test]
fn test_font_stack_from_variable() {
    let fonts = vec![Quoted::new("A").into(), Quoted::new("B").into()];
    let (text, fontsets, diagnostics) = serialize_through_variable("text-face-name", fonts, CompilerConfig::default());
    assert_eq!(text, r#"fontset-name="fontset-0""#);
    assert_eq!(fontsets[0].faces, vec!["A", "B"]);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_font_stack_from_variable_with_known_fonts() {
    let fonts = vec![Quoted::new("A").into(), Quoted::new("B").into()];
    let config = CompilerConfig::default().with_fonts(["A", "B"]);
    let (text, _, diagnostics) = serialize_through_variable("text-face-name", fonts, config);
    assert_eq!(text, r#"fontset-name="fontset-0""#);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_dasharray_from_variable() {
    let dashes = vec![Dimension::new(2.0).into(), Dimension::new(4.0).into()];
    let (text, _, diagnostics) = serialize_through_variable("line-dasharray", dashes, CompilerConfig::default());
    assert_eq!(text, r#"stroke-dasharray="2, 4""#);
    assert!(diagnostics.is_empty());
}
