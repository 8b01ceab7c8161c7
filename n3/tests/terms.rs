use n3_api::model::*;
use n3_api::parser::TriplesParser;
use n3_parser::*;
use std::error::Error;

const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

fn objects(data: &str, context: Context) -> Result<Vec<Term>, N3Error> {
    let mut objects = Vec::new();
    N3Parser::new(data.as_bytes(), context)?.parse_all(&mut |t| {
        objects.push(t.object);
        Ok(()) as Result<(), N3Error>
    })?;
    Ok(objects)
}

fn typed(value: &str, datatype: &str) -> Term {
    Literal::Typed {
        value: value.to_owned(),
        datatype: NamedNode::new(format!("{}{}", XSD, datatype)),
    }
    .into()
}

#[test]
fn bare_literals() -> Result<(), N3Error> {
    assert_eq!(
        vec![
            typed("true", "boolean"),
            typed("false", "boolean"),
            typed("-12", "integer"),
            typed("3.14", "decimal"),
            typed("6.02e23", "double"),
        ],
        objects(
            "<urn:s> <urn:p> true, false, -12, 3.14, 6.02e23.",
            Context::new()
        )?
    );
    Ok(())
}

#[test]
fn quoted_literals() -> Result<(), N3Error> {
    let data = r#"@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
<urn:s> <urn:p> "chat"@FR-be , "1"^^xsd:integer , "2"^^<http://www.w3.org/2001/XMLSchema#integer> ,
    """multi
line "quoted" text""" , "tab\there é\U0001F600" ."#;
    assert_eq!(
        vec![
            Literal::LanguageTaggedString {
                value: "chat".to_owned(),
                language: "fr-be".to_owned()
            }
            .into(),
            typed("1", "integer"),
            typed("2", "integer"),
            Literal::Simple {
                value: "multi\nline \"quoted\" text".to_owned()
            }
            .into(),
            Literal::Simple {
                value: "tab\there \u{e9}\u{1F600}".to_owned()
            }
            .into(),
        ],
        objects(data, Context::new())?
    );
    Ok(())
}

#[test]
fn relative_iris_are_resolved() -> Result<(), Box<dyn Error>> {
    assert_eq!(
        vec![
            Term::from(NamedNode::new("http://example.com/dir/o")),
            Term::from(NamedNode::new("http://example.com/other#o")),
            Term::from(NamedNode::new("http://example.com/dir/word")),
        ],
        objects(
            "<s> <p> <o> . <s> <p> <../other#o> . <s> <p> word .",
            Context::with_base("http://example.com/dir/")?
        )?
    );
    Ok(())
}

#[test]
fn bare_words_use_the_default_prefix() -> Result<(), N3Error> {
    assert_eq!(
        vec![
            Term::from(NamedNode::new("http://example.com/ns#o")),
            Term::from(NamedNode::new("http://example.com/ns#o.b")),
        ],
        objects(
            "@prefix : <http://example.com/ns#> .\ns p o. :s :p :o.b.",
            Context::new()
        )?
    );
    Ok(())
}

#[test]
fn starting_context_prefixes() -> Result<(), N3Error> {
    let context = Context::new().with_prefix("schema", "http://schema.org/");
    assert_eq!(
        vec![Term::from(NamedNode::new("http://schema.org/Person"))],
        objects("<urn:s> a schema:Person .", context)?
    );
    Ok(())
}

#[test]
fn base_directive_changes_resolution() -> Result<(), N3Error> {
    let data = "@base <http://example.com/a/> .\n<s> <p> <o> .\n@base <../b/> .\n<s> <p> <o> .";
    let mut parser = N3Parser::new(data.as_bytes(), Context::new())?;
    let mut triples = Vec::new();
    parser.parse_into(&mut triples)?;
    assert_eq!(
        vec![
            Term::from(NamedNode::new("http://example.com/a/o")),
            Term::from(NamedNode::new("http://example.com/b/o")),
        ],
        triples.into_iter().map(|t| t.object).collect::<Vec<_>>()
    );
    assert_eq!(Some("http://example.com/b/"), parser.context().base_iri());
    Ok(())
}

#[test]
fn comments_are_skipped() -> Result<(), N3Error> {
    assert_eq!(
        vec![Term::from(NamedNode::new("urn:o"))],
        objects(
            "# a comment\n<urn:s> # here too\n <urn:p> <urn:o> . # and at the end",
            Context::new()
        )?
    );
    Ok(())
}
