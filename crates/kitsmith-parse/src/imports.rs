use kitsmith_core::{ImportMap, Result};
use syn::{ItemUse, UseTree};

/// Registers every leaf of a use declaration under its final segment, or
/// under the explicit alias for `use … as alias`. Glob imports bind no
/// single identifier and are skipped.
pub fn register_use(map: &mut ImportMap, item: &ItemUse) -> Result<()> {
    walk_tree(map, &item.tree, &mut Vec::new())
}

fn walk_tree(map: &mut ImportMap, tree: &UseTree, prefix: &mut Vec<String>) -> Result<()> {
    match tree {
        UseTree::Path(path) => {
            prefix.push(path.ident.to_string());
            walk_tree(map, &path.tree, prefix)?;
            prefix.pop();
            Ok(())
        }
        UseTree::Name(name) => {
            if name.ident == "self" {
                if prefix.is_empty() {
                    return Ok(());
                }
                return map.add(&prefix.join("::"));
            }
            map.add(&join(prefix, &name.ident.to_string()))
        }
        UseTree::Rename(rename) => {
            map.add_as(rename.rename.to_string(), join(prefix, &rename.ident.to_string()))
        }
        UseTree::Glob(_) => Ok(()),
        UseTree::Group(group) => {
            for tree in &group.items {
                walk_tree(map, tree, prefix)?;
            }
            Ok(())
        }
    }
}

fn join(prefix: &[String], last: &str) -> String {
    if prefix.is_empty() {
        return last.to_string();
    }
    format!("{}::{}", prefix.join("::"), last)
}
