use log::trace;

use crate::{
    collision::{
        bvh::Bvh,
        contact::{Contact, Resolution},
    },
    config::{ContactOrder, ResolveOptions},
    core::types::Capsule,
};

/// Folds a list of contacts into one depenetration by pushing a working copy
/// of the capsule out of each contact in turn.
///
/// Contacts are not re-evaluated after each push. Order only shows through
/// rounding and through the fallback normal used when contacts cancel out.
pub struct ContactResolver;

impl ContactResolver {
    pub fn resolve(
        capsule: &Capsule,
        contacts: &[Contact],
        order: ContactOrder,
    ) -> Option<Resolution> {
        if contacts.is_empty() {
            return None;
        }

        let mut ordered: Vec<&Contact> = contacts.iter().collect();
        if order == ContactOrder::DeepestFirst {
            ordered.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        }

        let mut working = *capsule;
        for contact in &ordered {
            working.translate(contact.push_out());
        }

        let displacement = working.center() - capsule.center();
        let (normal, depth) = match displacement.try_normalize() {
            Some(normal) => (normal, displacement.length()),
            // Contacts cancelled out.
            None => (ordered[0].normal, 0.0),
        };

        Some(Resolution {
            normal,
            depth,
            contact_count: contacts.len(),
        })
    }
}

impl Bvh {
    /// Resolves `capsule` against the mesh, returning `None` when nothing
    /// touches it.
    pub fn capsule_intersect(&self, capsule: &Capsule) -> Option<Resolution> {
        self.capsule_intersect_with(capsule, &ResolveOptions::default())
    }

    pub fn capsule_intersect_with(
        &self,
        capsule: &Capsule,
        options: &ResolveOptions,
    ) -> Option<Resolution> {
        let contacts = self.capsule_contacts_with(capsule, options.segment_clamp);
        let resolution = ContactResolver::resolve(capsule, &contacts, options.order);
        if let Some(res) = &resolution {
            trace!(
                "capsule resolved from {} contacts, depth {:.4}",
                res.contact_count,
                res.depth
            );
        }
        resolution
    }
}
