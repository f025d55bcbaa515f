use serde::Serialize;

use crate::model::*;

/// One row per directory in pre-order.
#[derive(Debug, Clone, Serialize)]
pub struct DirReport {
    pub path: String,
    pub name: String,
    pub size: u64,
    pub files: u64,
    pub dirs: u64,
}

pub fn dir_reports(tree: &Tree) -> Vec<DirReport> {
    let Some(root) = tree.root() else {
        return Vec::new();
    };
    tree.dirs_preorder(root)
        .map(|id| {
            let stats = tree.stats(id);
            DirReport {
                path: tree.path_of(id),
                name: tree.node(id).name.clone(),
                size: stats.bytes,
                files: stats.files,
                dirs: stats.dirs,
            }
        })
        .collect()
}

pub fn to_csv(tree: &Tree, mut w: impl std::io::Write) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(&mut w);
    for row in dir_reports(tree) {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_json(tree: &Tree) -> serde_json::Value {
    serde_json::json!({
        "root": tree.root().map(|r| r.0),
        "dirs": dir_reports(tree),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::parse_transcript;

    fn tree() -> Tree {
        parse_transcript("$ cd /\n$ ls\ndir a\n5 x\n$ cd a\n$ ls\n7 y\n").unwrap()
    }

    #[test]
    fn csv_has_header_and_one_row_per_dir() {
        let mut out = Vec::new();
        to_csv(&tree(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "path,name,size,files,dirs");
        assert_eq!(lines[1], "/,/,12,2,1");
        assert_eq!(lines[2], "/a,a,7,1,0");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn json_lists_dirs() {
        let json = to_json(&tree());
        assert_eq!(json["root"], 0);
        assert_eq!(json["dirs"][1]["path"], "/a");
        assert_eq!(json["dirs"][1]["size"], 7);
    }

    #[test]
    fn empty_tree_exports_nothing() {
        let json = to_json(&Tree::new());
        assert!(json["root"].is_null());
        assert_eq!(json["dirs"].as_array().unwrap().len(), 0);
    }
}
