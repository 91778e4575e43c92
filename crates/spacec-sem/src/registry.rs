//! Shallow pre-pass building a read-only class signature table before the
//! real analysis walk begins.
//!
//! The walk itself is strictly sequential and single-pass (spec §2 "each
//! stage fully completes before the next begins"), but a class declared
//! later in the file is a completely ordinary reference target for one
//! declared earlier (spec §4.3.4's cross-class `->` access has no
//! declaration-order requirement). Grounded on the teacher's own two-phase
//! `collect_items`/`analyze_item` split in `faxc-sem`: a cheap first pass
//! records what every class exports, and the real walk consults that table
//! instead of requiring forward declarations. This pre-pass never emits
//! diagnostics of its own — duplicate members, wrong accessors, and the
//! rest are still entirely the analyzer's job during the real walk.

use std::collections::HashMap;

use spacec_par::{NodeKind, ParseNode};

use crate::symbol::{ScopeKind, Visibility};
use crate::types::{decode_type, VarType};

/// One field, function, or constructor as seen from outside its class.
#[derive(Clone, Debug)]
pub struct MemberSignature {
    pub declared_type: VarType,
    pub visibility: Visibility,
    pub kind: ScopeKind,
    /// Parameter types, in declaration order; empty for fields.
    pub param_types: Vec<VarType>,
}

/// Everything a class exports, as gathered by the shallow pass.
#[derive(Clone, Debug, Default)]
pub struct ClassSignature {
    pub name: String,
    pub parent: Option<String>,
    /// Fields and functions, keyed by name. A name collision here mirrors
    /// what the real walk will independently flag as `AlreadyDefined`; the
    /// pre-pass just keeps the last one seen since it never diagnoses.
    pub members: HashMap<String, MemberSignature>,
    /// Every declared constructor's parameter-type tuple, for resolving
    /// `new Foo(...)` call sites before the real walk reaches them.
    pub constructors: Vec<Vec<VarType>>,
}

/// Scans `root`'s top-level statements for `class` declarations and builds
/// a name-keyed signature table. Two internal passes: first collect every
/// class's bare name (so a field of type `OtherClass` decodes correctly
/// regardless of declaration order), then decode member types against that
/// complete name set.
pub fn build_class_registry(root: &ParseNode) -> HashMap<String, ClassSignature> {
    let class_nodes: Vec<&ParseNode> = root
        .details
        .iter()
        .filter(|n| n.kind == NodeKind::Class)
        .collect();

    let class_names: std::collections::HashSet<&str> =
        class_nodes.iter().map(|n| n.value.as_str()).collect();
    let is_class = |name: &str| class_names.contains(name);

    let mut registry = HashMap::new();
    for class_node in class_nodes {
        let signature = build_class_signature(class_node, &is_class);
        registry.insert(signature.name.clone(), signature);
    }
    registry
}

fn build_class_signature(class_node: &ParseNode, is_class: &impl Fn(&str) -> bool) -> ClassSignature {
    let parent = class_node
        .details
        .iter()
        .find(|n| n.kind == NodeKind::Inheritance)
        .map(|n| n.value.clone());

    let mut signature = ClassSignature {
        name: class_node.value.clone(),
        parent,
        members: HashMap::new(),
        constructors: Vec::new(),
    };

    let Some(body) = class_node.right.as_deref() else {
        return signature;
    };

    for member in &body.details {
        match member.kind {
            NodeKind::Variable
            | NodeKind::Constant
            | NodeKind::ArrayVariable
            | NodeKind::ConditionalVariable
            | NodeKind::InstanceVariable => {
                let declared_type = member
                    .details
                    .first()
                    .map(|ty| decode_type(ty, is_class))
                    .unwrap_or_else(VarType::custom);
                let visibility = member
                    .left
                    .as_deref()
                    .map(|m| Visibility::from_modifier_text(&m.value))
                    .unwrap_or(Visibility::PackageGlobal);
                signature.members.insert(
                    member.value.clone(),
                    MemberSignature {
                        declared_type,
                        visibility,
                        kind: ScopeKind::Variable,
                        param_types: Vec::new(),
                    },
                );
            }
            NodeKind::Function => {
                let declared_type = member
                    .details
                    .first()
                    .and_then(|rt| rt.details.first())
                    .map(|ty| decode_type(ty, is_class))
                    .unwrap_or_else(VarType::custom);
                let visibility = member
                    .left
                    .as_deref()
                    .map(|m| Visibility::from_modifier_text(&m.value))
                    .unwrap_or(Visibility::PackageGlobal);
                let param_types = member
                    .details
                    .iter()
                    .skip(1)
                    .filter(|d| d.kind == NodeKind::Parameter)
                    .filter_map(|p| p.details.first().map(|ty| decode_type(ty, is_class)))
                    .collect();
                signature.members.insert(
                    member.value.clone(),
                    MemberSignature {
                        declared_type,
                        visibility,
                        kind: ScopeKind::Function,
                        param_types,
                    },
                );
            }
            NodeKind::Constructor => {
                let param_types = member
                    .details
                    .iter()
                    .filter(|d| d.kind == NodeKind::Parameter)
                    .filter_map(|p| p.details.first().map(|ty| decode_type(ty, is_class)))
                    .collect();
                signature.constructors.push(param_types);
            }
            _ => {}
        }
    }

    signature
}
