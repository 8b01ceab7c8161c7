use n3_api::model::*;
use n3_api::parser::TriplesParser;
use n3_parser::*;

const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
const LOG_IMPLIES: &str = "http://www.w3.org/2000/10/swap/log#implies";
const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

fn parse(data: &str) -> Result<Vec<Triple>, N3Error> {
    let mut triples = Vec::new();
    N3Parser::new(data.as_bytes(), Context::new())?.parse_into(&mut triples)?;
    Ok(triples)
}

#[test]
fn formula_as_subject() -> Result<(), N3Error> {
    let triples = parse("{ <urn:a> a <urn:b>. } => <urn:c>.")?;
    assert_eq!(1, triples.len());
    assert_eq!(NamedNode::new(LOG_IMPLIES), triples[0].predicate);
    assert_eq!(Term::from(NamedNode::new("urn:c")), triples[0].object);

    let formula = triples[0].subject.as_formula().expect("a formula");
    assert_eq!(1, formula.len());
    assert_eq!(
        Triple {
            subject: NamedNode::new("urn:a").into(),
            predicate: NamedNode::new(RDF_TYPE),
            object: NamedNode::new("urn:b").into(),
        },
        formula.triples()[0]
    );
    Ok(())
}

#[test]
fn formula_statements_without_final_dot() -> Result<(), N3Error> {
    let triples = parse("<urn:x> <urn:says> { <urn:a> <urn:p> <urn:b>. <urn:c> <urn:p> <urn:d> }.")?;
    assert_eq!(1, triples.len());
    assert_eq!(2, triples[0].object.as_formula().map_or(0, Formula::len));
    Ok(())
}

#[test]
fn empty_formula() -> Result<(), N3Error> {
    let triples = parse("<urn:x> <urn:p> {}.")?;
    assert_eq!(Term::from(Formula::new()), triples[0].object);
    Ok(())
}

#[test]
fn nested_formulas() -> Result<(), N3Error> {
    let triples = parse("{ { <urn:a> <urn:p> <urn:b> } => { <urn:c> <urn:p> <urn:d> } } <urn:q> <urn:e>.")?;
    assert_eq!(1, triples.len());
    let outer = triples[0].subject.as_formula().expect("a formula");
    assert_eq!(1, outer.len());
    assert_eq!(NamedNode::new(LOG_IMPLIES), outer.triples()[0].predicate);
    assert!(outer.triples()[0].subject.as_formula().is_some());
    assert!(outer.triples()[0].object.as_formula().is_some());
    Ok(())
}

#[test]
fn formula_prefixes_do_not_leak() -> Result<(), N3Error> {
    let mut parser = N3Parser::new(
        b"{ @prefix ex: <http://example.com/> . ex:a ex:p ex:b } <urn:p> <urn:o> .\nex:a <urn:p> <urn:o> .".as_ref(),
        Context::new(),
    )?;
    let mut triples = Vec::new();
    parser.parse_into(&mut triples)?;
    assert_eq!(1, triples.len());
    assert_eq!(
        "{ <http://example.com/a> <http://example.com/p> <http://example.com/b> . } <urn:p> <urn:o> .",
        triples[0].to_string()
    );
    assert_eq!(None, parser.context().namespace("ex"));
    assert!(matches!(
        parser.warnings()[0].kind(),
        WarningKind::UnknownPrefix(prefix) if prefix == "ex"
    ));
    Ok(())
}

#[test]
fn blank_node_body_uses_the_node_as_subject() -> Result<(), N3Error> {
    let triples = parse("[ <urn:p> <urn:a>; <urn:q> <urn:b> ] <urn:r> <urn:c>.")?;
    assert_eq!(3, triples.len());
    let node = triples[0].subject.clone();
    assert!(matches!(node, Term::BlankNode(BlankNode::Anonymous { .. })));
    assert_eq!(
        vec![node.clone(), node.clone(), node],
        triples.iter().map(|t| t.subject.clone()).collect::<Vec<_>>()
    );
    assert_eq!(NamedNode::new("urn:r"), triples[2].predicate);
    Ok(())
}

#[test]
fn blank_node_body_inside_a_formula_stays_inside() -> Result<(), N3Error> {
    let triples = parse("{ <urn:x> <urn:p> [ <urn:q> <urn:y> ] } <urn:r> <urn:z>.")?;
    assert_eq!(1, triples.len());
    assert_eq!(2, triples[0].subject.as_formula().map_or(0, Formula::len));
    Ok(())
}

#[test]
fn labelled_blank_nodes() -> Result<(), N3Error> {
    let triples = parse("_:a <urn:p> _:b.")?;
    assert_eq!("_:a <urn:p> _:b .", triples[0].to_string());
    Ok(())
}

#[test]
fn list_is_a_first_rest_chain() -> Result<(), N3Error> {
    let triples = parse("<urn:x> <urn:p> (1 <urn:b>).")?;
    assert_eq!(1, triples.len());
    let list = triples[0].object.as_formula().expect("a formula").triples();
    assert_eq!(4, list.len());

    assert_eq!(NamedNode::new(RDF_FIRST), list[0].predicate);
    assert_eq!(
        Term::from(Literal::Typed {
            value: "1".to_owned(),
            datatype: NamedNode::new(XSD_INTEGER)
        }),
        list[0].object
    );
    assert_eq!(NamedNode::new(RDF_REST), list[1].predicate);
    assert_eq!(list[1].object, list[2].subject);
    assert_eq!(Term::from(NamedNode::new("urn:b")), list[2].object);
    assert_eq!(Term::from(NamedNode::new(RDF_NIL)), list[3].object);
    Ok(())
}

#[test]
fn empty_list() -> Result<(), N3Error> {
    let triples = parse("<urn:x> <urn:p> ().")?;
    assert_eq!(Term::from(Formula::new()), triples[0].object);
    Ok(())
}

#[test]
fn nested_lists() -> Result<(), N3Error> {
    let triples = parse("(<urn:a> (<urn:b>)) <urn:p> <urn:o>.")?;
    let list = triples[0].subject.as_formula().expect("a formula").triples();
    assert_eq!(4, list.len());
    assert!(list[0].object.as_formula().is_none());
    assert_eq!(2, list[2].object.as_formula().map_or(0, Formula::len));
    Ok(())
}
