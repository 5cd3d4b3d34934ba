use {
  crate::{
    errors::DescriptorError as Error,
    dialog::descriptor::DialogDescriptor,
  },
};

type Result<T> = std::result::Result<T, Error>;

/* Plugin id -> dialog descriptor shipped with the plugin */
const DESCRIPTORS: &[(&str, &str)] = &[
  ("l-filesToScp", include_str!("../../descriptors/l-filesToScp.json")),
  ("e-sparqlEndpointList", include_str!("../../descriptors/e-sparqlEndpointList.json")),
  ("t-mustacheChunked", include_str!("../../descriptors/t-mustacheChunked.json")),
];

pub fn ids() -> impl Iterator<Item = &'static str> {
  DESCRIPTORS.iter().map(|(id, _)| *id)
}
pub fn descriptor(plugin: &str) -> Result<DialogDescriptor> {
  match DESCRIPTORS.iter().find(|(id, _)| *id == plugin) {
    Some((_, json)) => DialogDescriptor::from_json(json),
    None => Err(Error::UnknownPlugin(plugin.to_string())),
  }
}
pub fn all() -> Result<Vec<(&'static str, DialogDescriptor)>> {
  DESCRIPTORS.iter()
    .map(|(id, json)| DialogDescriptor::from_json(json).map(|descriptor| (*id, descriptor)))
    .collect()
}
