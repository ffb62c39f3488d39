/// STL import (binary and ASCII) into custom-mesh objects
use std::collections::HashMap;

use nom::{
    bytes::complete::{tag, take},
    character::complete::{multispace0, multispace1, not_line_ending},
    multi::{count, many0},
    number::complete::{float, le_f32, le_u16, le_u32},
    sequence::preceded,
    IResult, InputLength,
};
use tracing::debug;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::object::Object3D;
use crate::point::Point3D;

const HEADER_LEN: usize = 80;
const TRIANGLE_LEN: usize = 50;

/// A triangle as stored in the file
#[derive(Debug, Clone, Copy, PartialEq)]
struct RawTriangle {
    normal: Point3D,
    vertices: [Point3D; 3],
}

/// Parse an STL file, binary or ASCII, into a single-coloured mesh.
///
/// Identical vertices are merged. Triangles wound against their stored
/// normal are flipped, and triangles that collapse to a line or point after
/// merging are dropped.
pub fn parse_stl(data: &[u8], color: Color) -> Result<Object3D> {
    let triangles = match std::str::from_utf8(data) {
        // binary files may also start with "solid", so fall back
        Ok(text) if data.starts_with(b"solid") => {
            parse_ascii(text).or_else(|_| parse_binary(data))?
        }
        _ => parse_binary(data)?,
    };
    build_mesh(&triangles, color)
}

fn build_mesh(triangles: &[RawTriangle], color: Color) -> Result<Object3D> {
    let mut mesh = Object3D::new();
    let mut indices: HashMap<Point3D, usize> = HashMap::new();
    let mut dropped = 0;

    for triangle in triangles {
        let [a, b, c] = triangle.vertices.map(|v| {
            *indices.entry(v).or_insert_with(|| mesh.add_vertex(v))
        });
        if a == b || b == c || a == c {
            dropped += 1;
            continue;
        }
        let [pa, pb, pc] = triangle.vertices;
        let winding = (pb - pa).cross(&(pc - pa));
        if winding.dot(&triangle.normal) < 0.0 {
            mesh.add_face(vec![a, c, b], color)?;
        } else {
            mesh.add_face(vec![a, b, c], color)?;
        }
    }

    debug!(
        triangles = triangles.len(),
        vertices = mesh.vertex_count(),
        dropped,
        "Parsed STL mesh"
    );
    Ok(mesh)
}

/// Parse a binary STL file
fn parse_binary(data: &[u8]) -> Result<Vec<RawTriangle>> {
    if data.len() < HEADER_LEN + 4 {
        return Err(Error::Stl("file too small to be a valid STL".to_string()));
    }
    let (body, triangle_count) = binary_header(data).map_err(|e| nom_error(e, data.len()))?;
    if body.len() < triangle_count as usize * TRIANGLE_LEN {
        return Err(Error::Stl(format!(
            "unexpected end of file: header announces {triangle_count} triangles"
        )));
    }
    count(binary_triangle, triangle_count as usize)(body)
        .map(|(_, triangles)| triangles)
        .map_err(|e| nom_error(e, data.len()))
}

fn binary_header(input: &[u8]) -> IResult<&[u8], u32> {
    let (input, _) = take(HEADER_LEN)(input)?;
    le_u32(input)
}

fn binary_triangle(input: &[u8]) -> IResult<&[u8], RawTriangle> {
    let (input, normal) = binary_vector3(input)?;
    let (input, a) = binary_vector3(input)?;
    let (input, b) = binary_vector3(input)?;
    let (input, c) = binary_vector3(input)?;
    // attribute byte count
    let (input, _) = le_u16(input)?;
    Ok((
        input,
        RawTriangle {
            normal,
            vertices: [a, b, c],
        },
    ))
}

fn binary_vector3(input: &[u8]) -> IResult<&[u8], Point3D> {
    let (input, x) = le_f32(input)?;
    let (input, y) = le_f32(input)?;
    let (input, z) = le_f32(input)?;
    Ok((input, point(x, y, z)))
}

/// Parse an ASCII STL file
fn parse_ascii(input: &str) -> Result<Vec<RawTriangle>> {
    match ascii_solid(input) {
        Ok((_, triangles)) => Ok(triangles),
        Err(e) => Err(nom_error(e, input.len())),
    }
}

fn ascii_solid(input: &str) -> IResult<&str, Vec<RawTriangle>> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    // optional name
    let (input, _) = not_line_ending(input)?;
    let (input, triangles) = many0(ascii_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;
    Ok((input, triangles))
}

fn ascii_facet(input: &str) -> IResult<&str, RawTriangle> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, normal) = ascii_vector3(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, a) = ascii_vertex(input)?;
    let (input, b) = ascii_vertex(input)?;
    let (input, c) = ascii_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;
    Ok((
        input,
        RawTriangle {
            normal,
            vertices: [a, b, c],
        },
    ))
}

fn ascii_vertex(input: &str) -> IResult<&str, Point3D> {
    preceded(preceded(multispace0, tag("vertex")), ascii_vector3)(input)
}

fn ascii_vector3(input: &str) -> IResult<&str, Point3D> {
    let (input, _) = multispace0(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = float(input)?;
    Ok((input, point(x, y, z)))
}

fn point(x: f32, y: f32, z: f32) -> Point3D {
    Point3D::new(f64::from(x), f64::from(y), f64::from(z))
}

/// Map a nom failure to a readable error with its byte offset
fn nom_error<I: InputLength>(err: nom::Err<nom::error::Error<I>>, total: usize) -> Error {
    match err {
        nom::Err::Incomplete(_) => Error::Stl("unexpected end of input".to_string()),
        nom::Err::Error(e) | nom::Err::Failure(e) => Error::Stl(format!(
            "{:?} at byte {}",
            e.code,
            total - e.input.input_len()
        )),
    }
}
