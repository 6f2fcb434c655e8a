use super::LinearElasticity;
use crate::base::{Dof, Error};
use std::fmt::Write;
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::Path;

impl LinearElasticity {
    /// Writes the mesh and the solution to a VTU file to perform visualization with ParaView
    ///
    /// The point data contains the `displacement` and the `reaction` (−R) vectors; the cell
    /// data contains the `cell_id`. The problem must be solved first.
    pub fn write_vtu<P>(&self, full_path: &P) -> Result<(), Error>
    where
        P: AsRef<std::ffi::OsStr> + ?Sized,
    {
        let (uu, rr) = match (self.displacement(), self.residual()) {
            (Some(uu), Some(rr)) => (uu, rr),
            _ => return Err(Error::Fem("the problem must be solved before writing the VTU file")),
        };
        let mesh = self.mesh();
        let space = self.function_space();
        let ndim = mesh.ndim;
        let npoint = mesh.points.len();
        let ncell = mesh.cells.len();

        // output buffer
        let mut buffer = String::new();

        // header
        write!(
            &mut buffer,
            "<?xml version=\"1.0\"?>\n\
             <VTKFile type=\"UnstructuredGrid\" version=\"0.1\" byte_order=\"LittleEndian\">\n\
             <UnstructuredGrid>\n\
             <Piece NumberOfPoints=\"{}\" NumberOfCells=\"{}\">\n",
            npoint, ncell
        )?;

        // nodes: coordinates
        write!(
            &mut buffer,
            "<Points>\n\
             <DataArray type=\"Float64\" NumberOfComponents=\"3\" format=\"ascii\">\n",
        )?;
        for point in &mesh.points {
            for i in 0..ndim {
                write!(&mut buffer, "{:?} ", point.coords[i])?;
            }
            if ndim == 2 {
                write!(&mut buffer, "0.0 ")?;
            }
        }
        write!(&mut buffer, "\n</DataArray>\n</Points>\n")?;

        // elements: connectivity
        write!(
            &mut buffer,
            "<Cells>\n\
             <DataArray type=\"Int32\" Name=\"connectivity\" format=\"ascii\">\n"
        )?;
        for cell in &mesh.cells {
            if cell.kind.vtk_type().is_none() {
                return Err(Error::Fem("cannot generate VTU file because VTK cell type is not available"));
            }
            for p in &cell.points {
                write!(&mut buffer, "{} ", p)?;
            }
        }

        // elements: offsets
        write!(
            &mut buffer,
            "\n</DataArray>\n\
             <DataArray type=\"Int32\" Name=\"offsets\" format=\"ascii\">\n"
        )?;
        let mut offset = 0;
        for cell in &mesh.cells {
            offset += cell.points.len();
            write!(&mut buffer, "{} ", offset)?;
        }

        // elements: types
        write!(
            &mut buffer,
            "\n</DataArray>\n\
             <DataArray type=\"UInt8\" Name=\"types\" format=\"ascii\">\n"
        )?;
        for cell in &mesh.cells {
            if let Some(vtk) = cell.kind.vtk_type() {
                write!(&mut buffer, "{} ", vtk)?;
            }
        }
        write!(&mut buffer, "\n</DataArray>\n</Cells>\n")?;

        // data: points
        write!(&mut buffer, "<PointData Vectors=\"displacement\">\n")?;
        for (name, values, sign) in [("displacement", uu, 1.0), ("reaction", rr, -1.0)] {
            write!(
                &mut buffer,
                "<DataArray type=\"Float64\" Name=\"{}\" NumberOfComponents=\"3\" format=\"ascii\">\n",
                name
            )?;
            for point in &mesh.points {
                for dof in [Dof::Ux, Dof::Uy, Dof::Uz] {
                    let value = match space.eq(point.id, dof).ok() {
                        Some(eq) => sign * values[eq],
                        None => 0.0,
                    };
                    write!(&mut buffer, "{:?} ", value)?;
                }
            }
            write!(&mut buffer, "\n</DataArray>\n")?;
        }
        write!(&mut buffer, "</PointData>\n")?;

        // data: cells
        write!(
            &mut buffer,
            "<CellData Scalars=\"cell_id\">\n\
             <DataArray type=\"Int32\" Name=\"cell_id\" NumberOfComponents=\"1\" format=\"ascii\">\n"
        )?;
        for cell in &mesh.cells {
            write!(&mut buffer, "{} ", cell.id)?;
        }
        write!(&mut buffer, "\n</DataArray>\n</CellData>\n")?;

        // footer
        write!(
            &mut buffer,
            "</Piece>\n\
             </UnstructuredGrid>\n\
             </VTKFile>\n"
        )?;

        // create directory
        let path = Path::new(full_path);
        if let Some(p) = path.parent() {
            fs::create_dir_all(p)?;
        }

        // write file
        let mut file = File::create(path)?;
        file.write_all(buffer.as_bytes())?;
        log::debug!("wrote {:?}", path);
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
