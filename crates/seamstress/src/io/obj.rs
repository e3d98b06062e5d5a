//! Wavefront OBJ reader.
//!
//! Reads the subset a UV unwrap needs: `v`, `vt`, `f` and `l` records plus
//! the first `o` name. Line elements (`l`) are the only way OBJ can carry
//! edges without faces, so every consecutive pair of an `l` record becomes
//! a wire edge. Normals, materials and groups are ignored.

use std::path::Path;

use crate::error::{PatternError, Result};
use crate::geometry::Point;
use crate::mesh::{UvMesh, VertexId};

/// Parse OBJ text. `path` is only used for error messages.
pub fn parse_obj(content: &str, path: &Path) -> Result<UvMesh> {
    let mut mesh = UvMesh::new();
    let mut uvs: Vec<Point> = Vec::new();

    for (line_no, raw) in content.lines().enumerate() {
        let line_no = line_no + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        let mut fields = line.split_whitespace();
        let Some(keyword) = fields.next() else {
            continue;
        };

        let parse_err = |details: String| PatternError::Parse {
            path: path.to_path_buf(),
            line: line_no,
            details,
        };

        match keyword {
            "v" => {
                let coords = parse_floats(fields, 3).map_err(&parse_err)?;
                mesh.add_vertex([coords[0], coords[1], coords[2]]);
            }
            "vt" => {
                let coords = parse_floats(fields, 1).map_err(&parse_err)?;
                let v = coords.get(1).copied().unwrap_or(0.0);
                uvs.push(Point::new(coords[0], v));
            }
            "f" => {
                let mut verts = Vec::new();
                let mut corner_uvs = Vec::new();
                let mut all_have_uv = true;

                for token in fields {
                    let (v, vt) = parse_corner(token, mesh.num_vertices(), uvs.len())
                        .map_err(&parse_err)?;
                    verts.push(v);
                    match vt {
                        Some(t) => corner_uvs.push(uvs[t]),
                        None => all_have_uv = false,
                    }
                }

                if !all_have_uv {
                    corner_uvs.clear();
                }
                mesh.add_face(&verts, &corner_uvs)
                    .map_err(|e| parse_err(e.to_string()))?;
            }
            "l" => {
                let mut verts = Vec::new();
                for token in fields {
                    let (v, _) = parse_corner(token, mesh.num_vertices(), uvs.len())
                        .map_err(&parse_err)?;
                    verts.push(v);
                }
                if verts.len() < 2 {
                    return Err(parse_err("line element needs at least two vertices".into()));
                }
                for pair in verts.windows(2) {
                    mesh.add_edge(pair[0], pair[1])
                        .map_err(|e| parse_err(e.to_string()))?;
                }
            }
            "o" => {
                if mesh.name().is_none() {
                    let name = line[1..].trim();
                    if !name.is_empty() {
                        mesh.set_name(name);
                    }
                }
            }
            _ => {}
        }
    }

    Ok(mesh)
}

/// Parse at least `min` floats from the remaining fields.
fn parse_floats<'a>(fields: impl Iterator<Item = &'a str>, min: usize) -> std::result::Result<Vec<f64>, String> {
    let values = fields
        .map(|f| f.parse::<f64>().map_err(|_| format!("invalid number '{}'", f)))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    if values.len() < min {
        return Err(format!("expected at least {} values, found {}", min, values.len()));
    }
    Ok(values)
}

/// Parse one `v`, `v/vt`, `v//vn` or `v/vt/vn` reference into 0-based
/// vertex and optional texture indices. Negative indices count back from
/// the latest element.
fn parse_corner(token: &str, num_verts: usize, num_uvs: usize) -> std::result::Result<(VertexId, Option<usize>), String> {
    let mut parts = token.split('/');
    let v = parts.next().unwrap_or("");
    let vt = parts.next().filter(|s| !s.is_empty());

    let v = resolve_index(v, num_verts).ok_or_else(|| format!("invalid vertex reference '{}'", token))?;
    let vt = match vt {
        Some(t) => Some(resolve_index(t, num_uvs).ok_or_else(|| format!("invalid texture reference '{}'", token))?),
        None => None,
    };
    Ok((VertexId::new(v), vt))
}

fn resolve_index(field: &str, count: usize) -> Option<usize> {
    let raw: i64 = field.parse().ok()?;
    let index = if raw > 0 {
        raw - 1
    } else if raw < 0 {
        count as i64 + raw
    } else {
        return None;
    };
    (0..count as i64).contains(&index).then_some(index as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD_OBJ: &str = "\
# unit quad
o Panel
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
f 1/1 2/2 3/3 4/4
";

    fn parse(text: &str) -> Result<UvMesh> {
        parse_obj(text, Path::new("test.obj"))
    }

    #[test]
    fn parses_quad_with_uvs() {
        let mesh = parse(QUAD_OBJ).unwrap();
        assert_eq!(mesh.name(), Some("Panel"));
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 1);
        assert!(mesh.has_uvs());
        let l = mesh.face(crate::mesh::FaceId::new(0)).loops()[2];
        assert_eq!(mesh.uv(l), Point::new(1.0, 1.0));
    }

    #[test]
    fn line_elements_become_wire_edges() {
        let text = format!("{}v 2 0 0\nv 3 0 0\nl 2 5 6\n", QUAD_OBJ);
        let mesh = parse(&text).unwrap();
        assert_eq!(mesh.wire_edges().count(), 2);
        assert_eq!(mesh.num_edges(), 6);
    }

    #[test]
    fn negative_indices_resolve_backwards() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nf -3/-3 -2/-2 -1/-1\n";
        let mesh = parse(text).unwrap();
        assert_eq!(mesh.num_faces(), 1);
        assert!(mesh.has_uvs());
    }

    #[test]
    fn faces_without_texture_indices_have_no_uvs() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n";
        let mesh = parse(text).unwrap();
        assert_eq!(mesh.num_faces(), 1);
        assert!(!mesh.has_uvs());
    }

    #[test]
    fn bad_reference_reports_line() {
        let err = parse("v 0 0 0\nv 1 0 0\nf 1 2 7\n").unwrap_err();
        match err {
            PatternError::Parse { line, ref details, .. } => {
                assert_eq!(line, 3);
                assert!(details.contains("7"), "{}", details);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn bad_number_is_an_error() {
        assert!(matches!(parse("v 0 zero 0\n"), Err(PatternError::Parse { line: 1, .. })));
        assert!(matches!(parse("v 0 0\n"), Err(PatternError::Parse { .. })));
    }
}
