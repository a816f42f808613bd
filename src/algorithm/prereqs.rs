use petgraph::Direction;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::models::{AssociationKind, PathwayElement};

/// Relación canónica "depende de" entre elementos.
///
/// Las asociaciones llegan expresadas desde cualquiera de los dos extremos
/// (`REQUIRES` desde el dependiente, `REQUIREMENT_OF` desde el prerequisito).
/// Ambas se pliegan en una sola dirección: arista `dependiente -> prerequisito`.
/// El `GraphMap` no repite aristas y conserva el orden de inserción de los
/// vecinos, así que cada nodo funciona como un conjunto ordenado de
/// prerequisitos directos. No hay cierre transitivo ni detección de ciclos.
#[derive(Debug, Clone)]
pub struct PrerequisiteGraph<'a> {
    graph: DiGraphMap<&'a str, ()>,
    ignored_associations: usize,
}

impl<'a> PrerequisiteGraph<'a> {
    pub fn resolve(elements: &'a [PathwayElement]) -> PrerequisiteGraph<'a> {
        let mut graph: DiGraphMap<&'a str, ()> = DiGraphMap::new();

        // Un nodo por elemento: los que no tienen asociaciones quedan con conjunto vacío
        for element in elements {
            graph.add_node(element.id.as_str());
        }

        let mut ignored_associations = 0usize;
        for element in elements {
            let this_id = element.id.as_str();
            for assoc in &element.element_associations {
                let other_id = assoc.associated_element_id.as_str();
                match assoc.association_kind() {
                    Some(AssociationKind::Requires) => {
                        graph.add_edge(this_id, other_id, ());
                    }
                    // invertida: el elemento asociado depende de este.
                    // add_edge crea el nodo destino si aún no existe
                    Some(AssociationKind::RequirementOf) => {
                        graph.add_edge(other_id, this_id, ());
                    }
                    None => {
                        debug!(element = this_id, tag = %assoc.kind, "asociación con tag desconocido ignorada");
                        ignored_associations += 1;
                    }
                }
            }
        }

        PrerequisiteGraph { graph, ignored_associations }
    }

    /// Prerequisitos directos de `id`, en orden de primera aserción.
    /// Un id que no aparece en el grafo produce un iterador vacío.
    pub fn prerequisites_of(&self, id: &'a str) -> impl Iterator<Item = &'a str> + '_ {
        self.graph.neighbors_directed(id, Direction::Outgoing)
    }

    /// Elementos que dependen directamente de `id`
    pub fn dependents_of(&self, id: &'a str) -> impl Iterator<Item = &'a str> + '_ {
        self.graph.neighbors_directed(id, Direction::Incoming)
    }

    pub fn depends_on(&self, dependent: &'a str, prerequisite: &'a str) -> bool {
        self.graph.contains_edge(dependent, prerequisite)
    }

    pub fn contains(&self, id: &'a str) -> bool {
        self.graph.contains_node(id)
    }

    /// Cantidad de nodos, incluidos los creados por asociaciones a ids ausentes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Aristas `(dependiente, prerequisito)` en orden de inserción, sin repetidas
    pub fn edges(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.graph.all_edges().map(|(dependent, prerequisite, _)| (dependent, prerequisite))
    }

    /// Asociaciones cuyo tag no es `REQUIRES` ni `REQUIREMENT_OF`
    pub fn ignored_associations(&self) -> usize {
        self.ignored_associations
    }
}
