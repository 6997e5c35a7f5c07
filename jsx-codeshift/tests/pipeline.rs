use jsx_codeshift::{driver, transform_source, FactoryRegistry, TransformConfig, TransformError};
use pretty_assertions::assert_eq;

fn squash(code: &str) -> String {
    code.lines().map(str::trim).collect()
}

fn transform(src: &str) -> String {
    transform_source("fixture.js", src, &TransformConfig::default())
        .unwrap()
        .code
}

const COMPONENT: &str = r#"
const Row = React.createClass({
  displayName: 'Row',
  render({div, span, a}) {
    const {p} = React.DOM;
    return div({className: 'row', ...this.props},
      span(null, this.props.label),
      a(Object.assign({href: '/x'}, extra), 'link'),
      p(null, 'a < b')
    );
  },
  _renderIcon() {
    var {i} = React.DOM, size = 12;
    return i({className: "icon"});
  }
});
"#;

#[test]
fn converts_a_legacy_component() {
    let out = transform(COMPONENT);
    let flat = squash(&out);
    assert!(flat.contains(r#"<div className="row" {...this.props}>"#), "{out}");
    assert!(flat.contains("<span>{this.props.label}</span>"), "{out}");
    assert!(flat.contains(r#"<a href="/x" {...extra}>link</a>"#), "{out}");
    assert!(flat.contains("<p>a &lt; b</p>"), "{out}");
    assert!(flat.contains(r#"<i className="icon""#), "{out}");
    assert!(out.contains("size = 12"), "{out}");
    assert!(!out.contains("React.DOM"), "{out}");
    assert!(!out.contains("createElement"), "{out}");
}

#[test]
fn second_run_changes_nothing() {
    let once = transform(COMPONENT);
    let again = transform_source("fixture.js", &once, &TransformConfig::default()).unwrap();
    assert!(!again.changed(), "{:?}", again.report);
    assert_eq!(again.code, once);
}

#[test]
fn every_registered_factory_becomes_its_tag() {
    let config = TransformConfig::default();
    for tag in ["div", "span", "table", "svg", "clipPath", "h1"] {
        let out = transform_source("f.js", &format!("x = {tag}({{id: 'k'}}, 'c');"), &config).unwrap();
        let flat = squash(&out.code);
        assert!(flat.contains(&format!(r#"<{tag} id="k">c</{tag}>"#)), "{tag}: {}", out.code);
    }
}

#[test]
fn unregistered_names_are_left_alone() {
    let config = TransformConfig {
        factories: ["div"].into_iter().collect::<FactoryRegistry>(),
        ..Default::default()
    };
    let out = transform_source("f.js", "x = span(null); y = div(null);", &config).unwrap();
    assert!(out.code.contains("span(null)"), "{}", out.code);
    assert!(!out.code.contains("div(null)"), "{}", out.code);
}

#[test]
fn dynamic_tags_survive_untouched() {
    let src = "x = React.createElement(tagName, {id: 1}, 'child');\n";
    assert_eq!(transform(src), src);
}

#[test]
fn malformed_render_aborts_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.js");
    let src = "module.exports = { render(props, ctx) { return div(null); } };\n";
    std::fs::write(&path, src).unwrap();

    let outcomes = driver::transform_files(&[path.clone()], &TransformConfig::default());
    match &outcomes[0].result {
        Err(e @ TransformError::TooManyRenderParams { .. }) => {
            assert!(e.to_string().contains("More than one parameter"), "{e}")
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(std::fs::read_to_string(&path).unwrap(), src);
}

#[test]
fn unexpected_props_abort_the_file() {
    let err = transform_source("f.js", "x = div(cond ? a : b);", &TransformConfig::default()).unwrap_err();
    assert_eq!(err.to_string(), r#"Unexpected attribute of type "ConditionalExpression""#);
}

#[test]
fn comments_are_not_dropped() {
    let src = "// leading note\nx = div(/* props */ null, 'a');\n";
    let out = transform(src);
    assert!(out.contains("leading note"), "{out}");
    assert!(squash(&out).contains("<div>a</div>"), "{out}");
}

#[test]
fn comments_on_removed_nodes_are_printed() {
    let src = "x = /* lead */ div({/* key */ id: 'a'}, /* first */ span(null), 'b' /* tail */);\n";
    let out = transform(src);
    let flat = squash(&out);
    assert!(flat.contains(r#"<div id="a">"#), "{out}");
    for text in ["lead", "key", "first", "tail"] {
        assert!(out.contains(text), "{text} missing from {out}");
    }
    assert!(flat.find("lead") < flat.find("<div"), "{out}");
    assert!(!out.contains("React"), "{out}");
}

#[test]
fn commented_output_is_stable() {
    let once = transform("x = /* lead */ div(null, /* first */ span(null));\n");
    let again = transform_source("fixture.js", &once, &TransformConfig::default()).unwrap();
    assert!(!again.changed(), "{:?}", again.report);
    assert_eq!(again.code, once);
}
