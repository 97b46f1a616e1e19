/// Declared metadata for a command or group registration.
///
/// The same shape serves both leaf commands and groups: an optional explicit
/// name, two levels of help text, and the handler the registration points at.
/// Display values are derived from this by the extraction rules in
/// [`crate::docs::info`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decl {
    pub name: Option<String>,
    pub short_help: Option<String>,
    pub help: Option<String>,
    pub callback: Option<Callback>,
    pub hidden: bool,
}

impl Decl {
    /// Declaration carrying only an explicit name, as used when grafting a
    /// resolved plugin under a derived subcommand name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Decl {
            name: Some(name.into()),
            ..Decl::default()
        }
    }
}

/// Handler behind a registration: its identifier and documentation string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callback {
    pub ident: String,
    pub doc: Option<String>,
}

/// A nested group registration: the metadata declared at the registration
/// site plus the group it points at. The two carry independent descriptive
/// text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subgroup {
    pub decl: Decl,
    pub group: CommandGroup,
}

/// Hierarchical collection of leaf commands and nested subgroups, forming one
/// level of the CLI hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandGroup {
    /// The group's own top-level declaration.
    pub decl: Decl,
    /// Leaf command registrations, in registration order.
    pub commands: Vec<Decl>,
    /// Subgroup registrations, in registration order.
    pub subgroups: Vec<Subgroup>,
}

impl CommandGroup {
    /// Graft `group` as a subcommand named `name`.
    ///
    /// Registration is keyed by name: a later registration under the same
    /// name replaces the earlier one in place, so the slot keeps the first
    /// registration's position and the last registration's content.
    pub fn add_group(&mut self, name: impl Into<String>, group: CommandGroup) {
        let name = name.into();
        let sub = Subgroup {
            decl: Decl::named(name.clone()),
            group,
        };
        if let Some(existing) = self
            .subgroups
            .iter_mut()
            .find(|s| s.decl.name.as_deref() == Some(name.as_str()))
        {
            *existing = sub;
        } else {
            self.subgroups.push(sub);
        }
    }

    /// Register a leaf command.
    pub fn add_command(&mut self, command: Decl) {
        self.commands.push(command);
    }

    /// Look up a direct subgroup by its registered name.
    #[must_use]
    pub fn subgroup(&self, name: &str) -> Option<&Subgroup> {
        self.subgroups
            .iter()
            .find(|s| s.decl.name.as_deref() == Some(name))
    }
}
