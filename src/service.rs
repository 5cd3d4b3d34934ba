/*
  The accessor dialogs use to read and write their configuration
  graph. Property and type names are short local names qualified
  with the service's namespace.
*/

use {
  chrono::NaiveDate,
  serde_json::Value,
  tracing::{debug, warn},
  crate::{
    errors::GraphError as Error,
    config::ServiceConfig,
    datastore::{
      graph::Graph,
      ids::{self, IdGenerator},
      resource::Resource,
    },
    rdf::namespace::{Namespace, Term},
  },
};

type Result<T> = std::result::Result<T, Error>;

/* Outcome of narrowing a lookup down to one value */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Single<T> {
  Missing,
  Unique(T),
  /* More than one match, the first in graph order is kept */
  Ambiguous{ first: T, count: usize },
}
impl<T> Single<T> {
  pub fn value(self) -> Option<T> {
    match self {
      Single::Missing => None,
      Single::Unique(value) | Single::Ambiguous{ first: value, .. } => Some(value),
    }
  }
  pub fn as_ref(&self) -> Single<&T> {
    match self {
      Single::Missing => Single::Missing,
      Single::Unique(value) => Single::Unique(value),
      Single::Ambiguous{ first, count } => Single::Ambiguous{ first, count: *count },
    }
  }
  pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Single<U> {
    match self {
      Single::Missing => Single::Missing,
      Single::Unique(value) => Single::Unique(f(value)),
      Single::Ambiguous{ first, count } => Single::Ambiguous{ first: f(first), count },
    }
  }
  pub fn is_missing(&self) -> bool {
    matches!(self, Single::Missing)
  }
  pub fn is_ambiguous(&self) -> bool {
    matches!(self, Single::Ambiguous{..})
  }
}

/// What [`RdfService::update_objects`] did to the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectsUpdate {
  /// Previously referenced resources deleted from the graph.
  pub removed: Vec<String>,
  /// New objects appended to the graph.
  pub added: Vec<String>,
  /// Identifiers generated for objects that arrived without one.
  pub assigned: Vec<String>,
}

#[derive(Debug)]
pub struct RdfService {
  namespace: Namespace,
  config: ServiceConfig,
  ids: Box<dyn IdGenerator>,
  graph: Graph,
}

/* Public */
impl RdfService {
  /* Constructors */
  pub fn create(prefix: impl Into<String>) -> Self {
    Self::with_config(prefix, ServiceConfig::default())
  }
  pub fn with_config(prefix: impl Into<String>, config: ServiceConfig) -> Self {
    RdfService {
      namespace: Namespace::new(prefix),
      ids: ids::from_config(&config),
      config,
      graph: Graph::new(),
    }
  }
  pub fn with_id_generator(mut self, generator: Box<dyn IdGenerator>) -> Self {
    self.ids = generator;
    self
  }

  pub fn namespace(&self) -> &Namespace {
    &self.namespace
  }
  pub fn config(&self) -> &ServiceConfig {
    &self.config
  }
  pub fn term(&self, local: &str) -> Term {
    self.namespace.term(local)
  }

  /* Data binding */
  pub fn set_data(&mut self, graph: Graph) {
    self.graph = graph;
  }
  pub fn data(&self) -> &Graph {
    &self.graph
  }
  pub fn data_mut(&mut self) -> &mut Graph {
    &mut self.graph
  }
  pub fn take_data(&mut self) -> Graph {
    std::mem::take(&mut self.graph)
  }

  /* Lookups */
  pub fn filter_single<T>(&self, mut items: Vec<T>) -> Single<T> {
    match items.len() {
      0 => Single::Missing,
      1 => Single::Unique(items.remove(0)),
      count => {
        warn!(namespace = %self.namespace, count, "multiple instances detected, using the first one");
        Single::Ambiguous{ first: items.remove(0), count }
      },
    }
  }
  pub fn find_by_type(&self, type_: &str) -> Vec<&Resource> {
    self.graph.find_by_type(self.term(type_).iri())
  }
  pub fn find_by_uri(&self, uri: &str) -> Vec<&Resource> {
    self.graph.find_by_uri(uri)
  }
  pub fn find_by_uri_containing(&self, fragment: &str) -> Vec<&Resource> {
    self.graph.find_by_uri_containing(fragment)
  }
  pub fn resource(&self, id: &str) -> Option<&Resource> {
    self.graph.position(id).map(|index| &self.graph[index])
  }
  pub fn resource_mut(&mut self, id: &str) -> Option<ResourceEntry<'_>> {
    let index = self.graph.position(id)?;
    Some(self.entry_at(index))
  }
  pub fn secure_by_type(&mut self, type_: &str) -> Result<ResourceEntry<'_>> {
    let type_iri = self.term(type_);
    let found: Vec<usize> = self.graph.iter()
      .enumerate()
      .filter(|(_, resource)| resource.has_type(type_iri.iri()))
      .map(|(index, _)| index)
      .collect();
    match self.filter_single(found).value() {
      Some(index) => Ok(self.entry_at(index)),
      None => self.create_object(type_),
    }
  }

  /* References */
  pub fn get_objects<'g>(&'g self, resource: &Resource, property: &str) -> Vec<&'g Resource> {
    resource.references(&self.term(property))
      .iter()
      .flat_map(|id| self.graph.find_by_uri(id))
      .collect()
  }
  pub fn get_object<'g>(&'g self, resource: &Resource, property: &str) -> Single<&'g Resource> {
    self.filter_single(self.get_objects(resource, property))
  }
  pub fn secure_object(&mut self, owner_id: &str, property: &str, type_: &str) -> Result<ResourceEntry<'_>> {
    let owner = self.owner_position(owner_id)?;
    let property = self.term(property);
    let found: Vec<usize> = self.graph[owner].references(&property)
      .iter()
      .flat_map(|id| self.positions(id))
      .collect();
    if let Some(index) = self.filter_single(found).value() {
      return Ok(self.entry_at(index))
    }
    let index = self.push_object(type_)?;
    let id = self.graph[index].id().unwrap_or_default().to_string();
    self.graph[owner].set_objects(&property, &[id]);
    Ok(self.entry_at(index))
  }
  pub fn set_objects<S: AsRef<str>>(&self, resource: &mut Resource, property: &str, uris: &[S]) {
    resource.set_objects(&self.term(property), uris);
  }
  /// Rebinds `property` of the owner to exactly `objects`.
  ///
  /// Resources referenced before but absent from `objects` are deleted from the
  /// graph. With `add_new`, objects that were not referenced before are appended,
  /// unless a resource with the same id is already present. Objects without an
  /// "@id" get one in the blank namespace.
  pub fn update_objects(
    &mut self,
    owner_id: &str,
    property: &str,
    mut objects: Vec<Resource>,
    add_new: bool,
  ) -> Result<ObjectsUpdate> {
    let owner = self.owner_position(owner_id)?;
    let property = self.term(property);
    let old_ids = self.graph[owner].references(&property);
    let mut update = ObjectsUpdate::default();
    /* Identify the incoming objects */
    let mut new_ids: Vec<String> = Vec::with_capacity(objects.len());
    for object in objects.iter_mut() {
      let id = match object.id() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
          let blank_namespace = self.config.blank_namespace.clone();
          let reserved: Vec<String> = new_ids.iter()
            .cloned()
            .chain(old_ids.iter().cloned())
            .collect();
          let id = self.allocate_id(&blank_namespace, &reserved)?;
          warn!(id = %id, property = %property, "blank nodes are not supported, assigning an identifier");
          object.set_id(id.clone());
          update.assigned.push(id.clone());
          id
        },
      };
      new_ids.push(id);
    }
    /* Remove */
    for id in old_ids.iter().filter(|id| !new_ids.contains(id)) {
      if self.graph.delete_by_uri(id).is_some() {
        update.removed.push(id.clone());
      }
    }
    /* Add */
    if add_new {
      for object in objects {
        let id = match object.id() {
          Some(id) => id.to_string(),
          None => continue,
        };
        if old_ids.contains(&id) || update.added.contains(&id) {
          continue
        }
        if self.graph.contains_id(&id) {
          debug!(id = %id, "object already in graph, keeping the existing instance");
          continue
        }
        self.graph.push(object);
        update.added.push(id);
      }
    }
    /* Rebind, the owner may have moved or been removed */
    match self.graph.position(owner_id) {
      Some(owner) => self.graph[owner].set_objects(&property, &new_ids),
      None => warn!(id = owner_id, "owner was removed while updating its own references"),
    }
    Ok(update)
  }

  /* Mutation */
  pub fn create_object(&mut self, type_: &str) -> Result<ResourceEntry<'_>> {
    let index = self.push_object(type_)?;
    Ok(self.entry_at(index))
  }
  pub fn delete_by_uri(&mut self, uri: &str) -> Option<Resource> {
    self.graph.delete_by_uri(uri)
  }
  /// A fresh identifier in `namespace`, unused in the graph and not in `reserved`.
  pub fn allocate_id(&mut self, namespace: &str, reserved: &[String]) -> Result<String> {
    for _ in 0..self.config.max_id_attempts {
      let candidate = format!("{}{}", namespace, self.ids.next_suffix());
      if !self.graph.contains_id(&candidate) && !reserved.contains(&candidate) {
        return Ok(candidate)
      }
      debug!(id = %candidate, "generated identifier collides, retrying");
    }
    Err(Error::IdSpaceExhausted {
      namespace: namespace.to_string(),
      attempts: self.config.max_id_attempts,
    })
  }

  /* Typed values on a resource held outside the graph, or read in place */
  pub fn get_string(&self, resource: &Resource, property: &str) -> String {
    resource.get_string(&self.term(property))
  }
  pub fn set_string(&self, resource: &mut Resource, property: &str, value: Option<&str>) {
    resource.set_string(&self.term(property), value)
  }
  pub fn get_integer(&self, resource: &Resource, property: &str) -> Option<i64> {
    resource.get_integer(&self.term(property))
  }
  pub fn set_integer(&self, resource: &mut Resource, property: &str, value: Option<i64>) {
    resource.set_integer(&self.term(property), value)
  }
  pub fn get_boolean(&self, resource: &Resource, property: &str) -> Option<bool> {
    resource.get_boolean(&self.term(property))
  }
  pub fn set_boolean(&self, resource: &mut Resource, property: &str, value: Option<bool>) {
    resource.set_boolean(&self.term(property), value)
  }
  pub fn get_date(&self, resource: &Resource, property: &str) -> Option<NaiveDate> {
    resource.get_date(&self.term(property))
  }
  pub fn set_date(&self, resource: &mut Resource, property: &str, value: Option<NaiveDate>) {
    resource.set_date(&self.term(property), value)
  }
  pub fn get_value<'r>(&self, resource: &'r Resource, property: &str) -> Option<&'r Value> {
    resource.get_value(&self.term(property))
  }
  pub fn set_value(&self, resource: &mut Resource, property: &str, value: Option<Value>) {
    resource.set_value(&self.term(property), value)
  }
  pub fn get_value_list(&self, resource: &Resource, property: &str) -> Vec<Value> {
    resource.get_value_list(&self.term(property))
  }
  pub fn set_value_list(&self, resource: &mut Resource, property: &str, values: &[Value]) {
    resource.set_value_list(&self.term(property), values)
  }
  pub fn get_iri(&self, resource: &Resource, property: &str) -> Option<String> {
    resource.get_iri(&self.term(property))
  }
  pub fn set_iri(&self, resource: &mut Resource, property: &str, value: Option<&str>) {
    resource.set_iri(&self.term(property), value)
  }
}

/* Private */
impl RdfService {
  fn entry_at(&mut self, index: usize) -> ResourceEntry<'_> {
    ResourceEntry {
      namespace: &self.namespace,
      resource: &mut self.graph[index],
    }
  }
  fn positions(&self, id: &str) -> Vec<usize> {
    self.graph.iter()
      .enumerate()
      .filter(|(_, resource)| resource.id() == Some(id))
      .map(|(index, _)| index)
      .collect()
  }
  fn owner_position(&self, owner_id: &str) -> Result<usize> {
    self.graph.position(owner_id)
      .ok_or_else(|| Error::UnknownResource(owner_id.to_string()))
  }
  fn push_object(&mut self, type_: &str) -> Result<usize> {
    let temp_namespace = self.config.temp_namespace.clone();
    let id = self.allocate_id(&temp_namespace, &[])?;
    let type_iri = self.term(type_);
    debug!(id = %id, type_ = %type_iri, "creating resource");
    Ok(self.graph.push(Resource::typed(id, &[type_iri.iri()])))
  }
}

/// A resource inside the service's graph, addressed by local property names.
#[derive(Debug)]
pub struct ResourceEntry<'a> {
  namespace: &'a Namespace,
  resource: &'a mut Resource,
}
impl<'a> ResourceEntry<'a> {
  pub fn id(&self) -> Option<&str> {
    self.resource.id()
  }
  pub fn resource(&self) -> &Resource {
    &*self.resource
  }
  pub fn resource_mut(&mut self) -> &mut Resource {
    &mut *self.resource
  }
  pub fn into_resource(self) -> &'a mut Resource {
    self.resource
  }
  pub fn term(&self, local: &str) -> Term {
    self.namespace.term(local)
  }

  pub fn references(&self, property: &str) -> Vec<String> {
    self.resource.references(&self.term(property))
  }
  pub fn set_objects<S: AsRef<str>>(&mut self, property: &str, uris: &[S]) {
    let property = self.term(property);
    self.resource.set_objects(&property, uris)
  }
  pub fn get_string(&self, property: &str) -> String {
    self.resource.get_string(&self.term(property))
  }
  pub fn set_string(&mut self, property: &str, value: Option<&str>) {
    let property = self.term(property);
    self.resource.set_string(&property, value)
  }
  pub fn get_integer(&self, property: &str) -> Option<i64> {
    self.resource.get_integer(&self.term(property))
  }
  pub fn set_integer(&mut self, property: &str, value: Option<i64>) {
    let property = self.term(property);
    self.resource.set_integer(&property, value)
  }
  pub fn get_boolean(&self, property: &str) -> Option<bool> {
    self.resource.get_boolean(&self.term(property))
  }
  pub fn set_boolean(&mut self, property: &str, value: Option<bool>) {
    let property = self.term(property);
    self.resource.set_boolean(&property, value)
  }
  pub fn get_date(&self, property: &str) -> Option<NaiveDate> {
    self.resource.get_date(&self.term(property))
  }
  pub fn set_date(&mut self, property: &str, value: Option<NaiveDate>) {
    let property = self.term(property);
    self.resource.set_date(&property, value)
  }
  pub fn get_value(&self, property: &str) -> Option<&Value> {
    self.resource.get_value(&self.term(property))
  }
  pub fn set_value(&mut self, property: &str, value: Option<Value>) {
    let property = self.term(property);
    self.resource.set_value(&property, value)
  }
  pub fn get_value_list(&self, property: &str) -> Vec<Value> {
    self.resource.get_value_list(&self.term(property))
  }
  pub fn set_value_list(&mut self, property: &str, values: &[Value]) {
    let property = self.term(property);
    self.resource.set_value_list(&property, values)
  }
  pub fn get_iri(&self, property: &str) -> Option<String> {
    self.resource.get_iri(&self.term(property))
  }
  pub fn set_iri(&mut self, property: &str, value: Option<&str>) {
    let property = self.term(property);
    self.resource.set_iri(&property, value)
  }
}
