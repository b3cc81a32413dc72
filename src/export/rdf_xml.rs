use std::collections::HashMap;
use std::io::Write;

use anyhow::{Context, Result};
use html_escape::{encode_double_quoted_attribute, encode_text};
use log::info;

use crate::core::index::Conversion;
use crate::export::graph::{build_graph, Graph, Object, Triple, UuidMinter};
use crate::export::vocab::NAMESPACES;
use crate::export::{Destination, Exporter};

/// Writes the annotation graph of a conversion as RDF/XML.
#[derive(Debug, Clone)]
pub struct RdfXmlExporter {
    destination: Destination,
}

impl RdfXmlExporter {
    pub fn new(destination: Destination) -> Self {
        Self { destination }
    }
}

impl Exporter for RdfXmlExporter {
    fn export(&self, conversion: &Conversion) -> Result<()> {
        let graph = build_graph(conversion, &mut UuidMinter)?;
        info!("emitting {} triples", graph.len());
        let mut out = self.destination.open()?;
        write_graph(&graph, &mut out).context("failed to write RDF/XML")?;
        out.flush()?;
        Ok(())
    }
}

/// Splits a predicate IRI into an element name and, when no well-known
/// prefix covers it, the namespace that must be declared inline.
fn qualified_name(iri: &str) -> (String, Option<&str>) {
    for (prefix, namespace) in NAMESPACES {
        if let Some(local) = iri.strip_prefix(namespace) {
            if is_local_name(local) {
                return (format!("{prefix}:{local}"), None);
            }
        }
    }
    match iri.rfind(['#', '/']) {
        Some(split) if is_local_name(&iri[split + 1..]) => {
            (format!("ns0:{}", &iri[split + 1..]), Some(&iri[..=split]))
        }
        _ => (format!("ns0:{iri}"), Some("")),
    }
}

fn is_local_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Triples grouped by subject, subjects in order of first appearance.
fn group_by_subject(graph: &Graph) -> Vec<(&str, Vec<&Triple>)> {
    let mut groups: Vec<(&str, Vec<&Triple>)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();
    for triple in graph.triples() {
        let slot = *slots.entry(triple.subject.as_str()).or_insert_with(|| {
            groups.push((triple.subject.as_str(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(triple);
    }
    groups
}

pub fn write_graph<W: Write>(graph: &Graph, out: &mut W) -> Result<()> {
    writeln!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    write!(out, "<rdf:RDF")?;
    for (prefix, namespace) in NAMESPACES {
        write!(out, "\n\txmlns:{prefix}=\"{namespace}\"")?;
    }
    writeln!(out, ">")?;

    for (subject, triples) in group_by_subject(graph) {
        writeln!(
            out,
            "\n<rdf:Description rdf:about=\"{}\">",
            encode_double_quoted_attribute(subject)
        )?;
        for triple in triples {
            let (name, namespace) = qualified_name(triple.predicate);
            let declaration = namespace
                .map(|ns| format!(" xmlns:ns0=\"{}\"", encode_double_quoted_attribute(ns)))
                .unwrap_or_default();
            match &triple.object {
                Object::Iri(iri) => writeln!(
                    out,
                    "\t<{name}{declaration} rdf:resource=\"{}\"/>",
                    encode_double_quoted_attribute(iri)
                )?,
                Object::Literal(value) => writeln!(
                    out,
                    "\t<{name}{declaration}>{}</{name}>",
                    encode_text(value)
                )?,
            }
        }
        writeln!(out, "</rdf:Description>")?;
    }

    writeln!(out, "\n</rdf:RDF>")?;
    Ok(())
}
