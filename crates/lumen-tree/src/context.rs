/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2025 The Lumen project
 */
use ahash::AHashMap;
use slotmap::SlotMap;

use crate::{
    builder::{Implementation, IntermediateBuilder, LeafBuilder},
    element::{Element, ElementKey, ElementKind, ParentRef, TypeParam},
    error::SchemaError,
    field::Field,
    types::{ClassRef, TypeBase, TypeRef},
    util::MutableOrEmptyList,
};

///Package every generated unit lives under.
pub const BASE_PACKAGE: &str = "org.lumenlang.compiler.tree";

///Prefix of every generated type name.
pub const TYPE_PREFIX: &str = "Lumen";

///Qualified name suffix that exempts a field named `source` from the replace
/// override contract. Kept as the literal type name on purpose, the scope of
/// the exemption is exactly this one type and must not widen silently.
pub const QUALIFIED_ACCESS_TYPE: &str = "LumenQualifiedAccessExpression";

///Deferred per-element customization, run once at finalization. Runs after
/// every element exists, so it may look up elements registered later than
/// its owner.
pub type Configuration = Box<dyn FnOnce(&mut TreeContext, ElementKey) -> Result<(), SchemaError>>;

///Write-once registry of the whole tree schema.
///
/// The context starts out with the root element registered and is populated
/// by the schema definition. [TreeContext::apply_configurations] runs all
/// deferred customizations and freezes the registry, afterwards any mutation
/// is a programming error and asserts.
pub struct TreeContext {
    arena: SlotMap<ElementKey, Element>,
    ///Registration order, the arena itself is only used for lookup.
    order: Vec<ElementKey>,
    by_name: AHashMap<String, ElementKey>,
    root: ElementKey,
    implementations: Vec<Implementation>,
    leaf_builders: Vec<LeafBuilder>,
    intermediate_builders: Vec<IntermediateBuilder>,
    configurations: Vec<(ElementKey, Configuration)>,
    frozen: bool,
}

impl TreeContext {
    pub fn new() -> Self {
        let mut arena = SlotMap::with_key();
        let root = arena.insert(Element {
            name: "Element".to_owned(),
            package: BASE_PACKAGE.to_owned(),
            kind: ElementKind::Interface,
            is_sealed: false,
            parent_refs: Vec::new(),
            fields: Vec::new(),
            params: MutableOrEmptyList::new(),
            additional_supertypes: MutableOrEmptyList::new(),
            arbitrary_imports: MutableOrEmptyList::new(),
            need_transform_other_children: false,
        });

        let mut by_name = AHashMap::default();
        by_name.insert("Element".to_owned(), root);

        TreeContext {
            arena,
            order: vec![root],
            by_name,
            root,
            implementations: Vec::new(),
            leaf_builders: Vec::new(),
            intermediate_builders: Vec::new(),
            configurations: Vec::new(),
            frozen: false,
        }
    }

    pub fn root(&self) -> ElementKey {
        self.root
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn assert_mutable(&self) {
        assert!(
            !self.frozen,
            "the tree schema is frozen, mutation after finalization is a bug"
        );
    }

    pub fn define_element(
        &mut self,
        name: &str,
        kind: ElementKind,
        parents: &[ElementKey],
    ) -> Result<ElementKey, SchemaError> {
        self.define(name, "", kind, parents, false)
    }

    pub fn define_element_in(
        &mut self,
        name: &str,
        subpackage: &str,
        kind: ElementKind,
        parents: &[ElementKey],
    ) -> Result<ElementKey, SchemaError> {
        self.define(name, subpackage, kind, parents, false)
    }

    pub fn define_sealed_element(
        &mut self,
        name: &str,
        kind: ElementKind,
        parents: &[ElementKey],
    ) -> Result<ElementKey, SchemaError> {
        self.define(name, "", kind, parents, true)
    }

    pub fn define_sealed_element_in(
        &mut self,
        name: &str,
        subpackage: &str,
        kind: ElementKind,
        parents: &[ElementKey],
    ) -> Result<ElementKey, SchemaError> {
        self.define(name, subpackage, kind, parents, true)
    }

    fn define(
        &mut self,
        name: &str,
        subpackage: &str,
        kind: ElementKind,
        parents: &[ElementKey],
        sealed: bool,
    ) -> Result<ElementKey, SchemaError> {
        self.assert_mutable();
        if self.by_name.contains_key(name) {
            return Err(SchemaError::DuplicateElement(name.to_owned()));
        }

        let package = if subpackage.is_empty() {
            BASE_PACKAGE.to_owned()
        } else {
            format!("{}.{}", BASE_PACKAGE, subpackage)
        };

        //an element without declared parents hangs off the root
        let mut parent_refs: Vec<ParentRef> = parents.iter().map(|p| ParentRef::new(*p)).collect();
        if parent_refs.is_empty() {
            parent_refs.push(ParentRef::new(self.root));
        }

        let key = self.arena.insert(Element {
            name: name.to_owned(),
            package,
            kind,
            is_sealed: sealed,
            parent_refs,
            fields: Vec::new(),
            params: MutableOrEmptyList::new(),
            additional_supertypes: MutableOrEmptyList::new(),
            arbitrary_imports: MutableOrEmptyList::new(),
            need_transform_other_children: false,
        });
        self.order.push(key);
        self.by_name.insert(name.to_owned(), key);
        Ok(key)
    }

    pub fn element(&self, key: ElementKey) -> &Element {
        &self.arena[key]
    }

    ///All elements in registration order, root first.
    pub fn elements(&self) -> impl Iterator<Item = ElementKey> + '_ {
        self.order.iter().copied()
    }

    pub fn lookup(&self, name: &str) -> Option<ElementKey> {
        self.by_name.get(name).copied()
    }

    ///Type reference to a previously registered element.
    pub fn element_type(&self, name: &str) -> Result<TypeRef, SchemaError> {
        self.lookup(name)
            .map(TypeRef::element)
            .ok_or_else(|| SchemaError::UnresolvedType(name.to_owned()))
    }

    ///Attaches `field` to the element. Append-only, the type reference is
    /// validated right here so a broken schema fails at its declaration site.
    pub fn add_field(&mut self, key: ElementKey, field: Field) -> Result<(), SchemaError> {
        self.assert_mutable();
        if self.arena[key].field(&field.name).is_some() {
            return Err(SchemaError::DuplicateField {
                element: self.arena[key].name.clone(),
                field: field.name,
            });
        }
        self.validate_type(key, &field.ty)?;
        for overridden in &field.overridden_types {
            self.validate_type(key, overridden)?;
        }
        self.arena[key].fields.push(field);
        Ok(())
    }

    fn validate_type(&self, owner: ElementKey, ty: &TypeRef) -> Result<(), SchemaError> {
        match &ty.base {
            TypeBase::Element(key) => {
                if !self.arena.contains_key(*key) {
                    return Err(SchemaError::UnresolvedType(
                        "<unregistered element>".to_owned(),
                    ));
                }
            }
            TypeBase::Class(_) => {}
            TypeBase::Param(param) => {
                let element = &self.arena[owner];
                if !element.params.iter().any(|p| &p.name == param) {
                    return Err(SchemaError::UnknownTypeParameter {
                        element: element.name.clone(),
                        param: param.clone(),
                    });
                }
            }
        }
        for arg in &ty.args {
            self.validate_type(owner, arg)?;
        }
        Ok(())
    }

    pub fn add_parent(&mut self, key: ElementKey, parent: ParentRef) -> Result<(), SchemaError> {
        self.assert_mutable();
        if !self.arena.contains_key(parent.element) {
            return Err(SchemaError::UnresolvedType(
                "<unregistered element>".to_owned(),
            ));
        }
        for arg in &parent.args {
            self.validate_type(key, arg)?;
        }
        self.arena[key].parent_refs.push(parent);
        Ok(())
    }

    pub fn add_type_param(&mut self, key: ElementKey, param: TypeParam) {
        self.assert_mutable();
        self.arena[key].params.push(param);
    }

    pub fn add_supertype_interface(&mut self, key: ElementKey, class: &ClassRef) {
        self.assert_mutable();
        self.arena[key].additional_supertypes.push(class.clone());
    }

    pub fn add_import(&mut self, key: ElementKey, class: &ClassRef) {
        self.assert_mutable();
        self.arena[key].arbitrary_imports.push(class.clone());
    }

    pub fn set_transform_other_children(&mut self, key: ElementKey) {
        self.assert_mutable();
        self.arena[key].need_transform_other_children = true;
    }

    ///Registers a deferred customization for `key`, executed once by
    /// [TreeContext::apply_configurations].
    pub fn configure(
        &mut self,
        key: ElementKey,
        configuration: impl FnOnce(&mut TreeContext, ElementKey) -> Result<(), SchemaError> + 'static,
    ) {
        self.assert_mutable();
        self.configurations.push((key, Box::new(configuration)));
    }

    ///Runs all deferred configurations in registration order and freezes the
    /// schema. Must be called exactly once, generation only accepts a frozen
    /// context.
    pub fn apply_configurations(&mut self) -> Result<(), SchemaError> {
        self.assert_mutable();
        let configurations = std::mem::take(&mut self.configurations);
        for (key, configuration) in configurations {
            configuration(self, key)?;
        }
        self.frozen = true;
        Ok(())
    }

    ///Registers the concrete implementation of `element` and returns its
    /// index.
    pub fn implementation(&mut self, element: ElementKey) -> usize {
        self.assert_mutable();
        let index = self.implementations.len();
        self.implementations.push(Implementation { element });
        index
    }

    ///Registers the one leaf builder of `implementation`.
    pub fn leaf_builder(&mut self, implementation: usize) -> usize {
        self.assert_mutable();
        assert!(
            !self
                .leaf_builders
                .iter()
                .any(|b| b.implementation == implementation),
            "an implementation has exactly one leaf builder"
        );
        let index = self.leaf_builders.len();
        self.leaf_builders.push(LeafBuilder {
            implementation,
            parents: Vec::new(),
        });
        index
    }

    pub fn leaf_builder_parent(&mut self, builder: usize, parent: usize) {
        self.assert_mutable();
        self.leaf_builders[builder].parents.push(parent);
    }

    pub fn intermediate_builder(&mut self, name: &str) -> usize {
        self.assert_mutable();
        let index = self.intermediate_builders.len();
        self.intermediate_builders.push(IntermediateBuilder {
            name: name.to_owned(),
            package: BASE_PACKAGE.to_owned(),
            fields: Vec::new(),
            parents: Vec::new(),
            materialized_element: None,
        });
        index
    }

    pub fn builder_field(&mut self, builder: usize, field: Field) -> Result<(), SchemaError> {
        self.assert_mutable();
        //builder subsets never use element type parameters, validate against
        //the root
        self.validate_type(self.root, &field.ty)?;
        self.intermediate_builders[builder].fields.push(field);
        Ok(())
    }

    pub fn builder_parent(&mut self, builder: usize, parent: usize) {
        self.assert_mutable();
        self.intermediate_builders[builder].parents.push(parent);
    }

    pub fn set_materialized_element(&mut self, builder: usize, element: ElementKey) {
        self.assert_mutable();
        self.intermediate_builders[builder].materialized_element = Some(element);
    }

    pub fn implementations(&self) -> &[Implementation] {
        &self.implementations
    }

    pub fn leaf_builders(&self) -> &[LeafBuilder] {
        &self.leaf_builders
    }

    pub fn intermediate_builders(&self) -> &[IntermediateBuilder] {
        &self.intermediate_builders
    }

    ///Fully qualified name of the type behind `ty`, `None` for type
    /// parameters.
    pub fn type_fqn(&self, ty: &TypeRef) -> Option<String> {
        match &ty.base {
            TypeBase::Element(key) => Some(self.arena[*key].full_qualified_name()),
            TypeBase::Class(class) => Some(class.full_qualified_name()),
            TypeBase::Param(_) => None,
        }
    }

    ///Simple name of the type behind `ty`, as it appears in source.
    pub fn type_name_of(&self, ty: &TypeRef) -> String {
        match &ty.base {
            TypeBase::Element(key) => self.arena[*key].type_name(),
            TypeBase::Class(class) => class.name.clone(),
            TypeBase::Param(param) => param.clone(),
        }
    }
}

impl Default for TreeContext {
    fn default() -> Self {
        TreeContext::new()
    }
}
