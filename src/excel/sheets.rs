//! Worksheet enumeration - the only thing the dispatcher needs from a workbook

use crate::error::{DispatchError, DispatchResult};
use calamine::{open_workbook_auto, Reader};
use std::path::Path;
use tracing::debug;

/// Something that can list a workbook's worksheet names in native order
pub trait SheetSource {
    fn sheet_names(&self, path: &Path) -> DispatchResult<Vec<String>>;
}

/// Reads sheet names with calamine (xlsx, xlsm, xlsb, xls, ods)
#[derive(Debug, Default, Clone, Copy)]
pub struct CalamineSource;

impl SheetSource for CalamineSource {
    fn sheet_names(&self, path: &Path) -> DispatchResult<Vec<String>> {
        list_worksheet_names(path)
    }
}

/// List the worksheet names of the workbook at `path`, in workbook order.
///
/// The file is only opened for reading.
pub fn list_worksheet_names(path: &Path) -> DispatchResult<Vec<String>> {
    if !path.exists() {
        return Err(DispatchError::InputNotFound(path.to_path_buf()));
    }

    let workbook = open_workbook_auto(path).map_err(|e| DispatchError::UnreadableWorkbook {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let names = workbook.sheet_names();
    debug!(count = names.len(), path = %path.display(), "listed worksheets");
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    fn write_workbook(path: &Path, sheets: &[&str]) {
        let mut workbook = Workbook::new();
        for name in sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(*name).unwrap();
            worksheet.write_string(0, 0, "Item").unwrap();
        }
        workbook.save(path).unwrap();
    }

    #[test]
    fn test_lists_sheets_in_workbook_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.xlsx");
        write_workbook(&path, &["Salon", "Engine Room", "Galley"]);

        let names = list_worksheet_names(&path).unwrap();
        assert_eq!(names, vec!["Salon", "Engine Room", "Galley"]);
    }

    #[test]
    fn test_missing_input() {
        let result = CalamineSource.sheet_names(Path::new("does/not/exist.xlsx"));
        assert!(matches!(result, Err(DispatchError::InputNotFound(_))));
    }

    #[test]
    fn test_garbage_file_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"this is not a zip archive").unwrap();

        let result = list_worksheet_names(&path);
        assert!(matches!(
            result,
            Err(DispatchError::UnreadableWorkbook { .. })
        ));
    }

    #[test]
    fn test_unknown_extension_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.txt");
        std::fs::write(&path, "Item,Qty\n").unwrap();

        assert!(matches!(
            list_worksheet_names(&path),
            Err(DispatchError::UnreadableWorkbook { .. })
        ));
    }

    #[test]
    fn test_source_does_not_modify_input() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inventory.xlsx");
        write_workbook(&path, &["Salon"]);
        let before = std::fs::read(&path).unwrap();

        CalamineSource.sheet_names(&path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), before);
    }
}
