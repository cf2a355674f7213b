use pretty_assertions::assert_eq;
use tutor_core::{format_inline, format_lines, DisplayNode, Span};

fn text(s: &str) -> Span {
    Span::Text(s.to_string())
}

#[test]
fn plain_text_is_one_paragraph_per_line() {
    let input = "The slope is rising.\nIt never stops";
    let nodes: Vec<_> = format_lines(input).collect();
    assert_eq!(
        nodes,
        vec![
            DisplayNode::Paragraph(vec![text("The slope is rising.")]),
            DisplayNode::Paragraph(vec![text("It never stops")]),
        ]
    );
}

#[test]
fn headings_lists_and_spacers() {
    let input = "# Limits\n## Definition\n### Example\n\n1. First step\n12.\tTwelfth\n2.no space";
    let nodes: Vec<_> = format_lines(input).collect();
    assert_eq!(
        nodes,
        vec![
            DisplayNode::Heading {
                level: 1,
                text: "Limits".to_string()
            },
            DisplayNode::Heading {
                level: 2,
                text: "Definition".to_string()
            },
            DisplayNode::Heading {
                level: 3,
                text: "Example".to_string()
            },
            DisplayNode::Spacer,
            DisplayNode::ListItem {
                label: "1.".to_string(),
                spans: vec![text("First step")],
            },
            DisplayNode::ListItem {
                label: "12.".to_string(),
                spans: vec![text("Twelfth")],
            },
            DisplayNode::Paragraph(vec![text("2.no space")]),
        ]
    );
}

#[test]
fn hashes_without_space_are_not_headings() {
    let nodes: Vec<_> = format_lines("#hashtag").collect();
    assert_eq!(nodes, vec![DisplayNode::Paragraph(vec![text("#hashtag")])]);
}

#[test]
fn inline_emphasis_and_math() {
    let spans = format_inline(r"Use **the chain rule** on *f(g(x))*: \(f'(g(x))g'(x)\) or \[\int x\,dx\]");
    assert_eq!(
        spans,
        vec![
            text("Use "),
            Span::Strong("the chain rule".to_string()),
            text(" on "),
            Span::Emphasis("f(g(x))".to_string()),
            text(": "),
            Span::Math {
                tex: "f'(g(x))g'(x)".to_string(),
                display: false
            },
            text(" or "),
            Span::Math {
                tex: r"\int x\,dx".to_string(),
                display: true
            },
        ]
    );
}

#[test]
fn list_item_body_is_inline_formatted() {
    let nodes: Vec<_> = format_lines("3. Multiply by **n**").collect();
    assert_eq!(
        nodes,
        vec![DisplayNode::ListItem {
            label: "3.".to_string(),
            spans: vec![text("Multiply by "), Span::Strong("n".to_string())],
        }]
    );
}

#[test]
fn unclosed_delimiters_stay_literal() {
    assert_eq!(format_inline("2 ** 3"), vec![text("2 ** 3")]);
    assert_eq!(format_inline(r"open \( math"), vec![text(r"open \( math")]);
    assert_eq!(format_inline("****"), vec![text("****")]);
}

#[test]
fn overlapping_delimiters_do_not_panic() {
    let inputs = [
        "**a *b** c*",
        r"\(**\)**",
        r"\[ \( \] \)",
        "*",
        "é**ü**",
        "∫x²dx *ok*",
    ];
    for input in inputs {
        let rendered: String = format_inline(input)
            .into_iter()
            .map(|span| match span {
                Span::Text(s) | Span::Strong(s) | Span::Emphasis(s) => s,
                Span::Math { tex, .. } => tex,
            })
            .collect();
        assert!(!rendered.is_empty(), "no output for {input:?}");
    }
}

#[test]
fn formatter_is_restartable() {
    let lines = format_lines("# Title\nbody");
    let first: Vec<_> = lines.clone().collect();
    let second: Vec<_> = lines.collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}
