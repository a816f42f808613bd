use std::collections::HashMap;

use crate::models::PathwayElement;

/// Índice id -> elemento para resolver en O(1) durante el resto del pipeline.
/// Con ids repetidos gana el último elemento de la lista.
#[derive(Debug, Default)]
pub struct ElementIndex<'a> {
    by_id: HashMap<&'a str, &'a PathwayElement>,
}

impl<'a> ElementIndex<'a> {
    pub fn build(elements: &'a [PathwayElement]) -> ElementIndex<'a> {
        let mut by_id = HashMap::with_capacity(elements.len());
        for element in elements {
            by_id.insert(element.id.as_str(), element);
        }
        ElementIndex { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a PathwayElement> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
