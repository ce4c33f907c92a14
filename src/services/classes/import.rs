//! 学生名单批量导入
//!
//! 接收 multipart 上传的 CSV 文件，逐行创建学生账号并挂入指定班级。
//! 行级错误不会中断整体导入，逐条记录在响应的 errors 列表中。

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::StreamExt;
use std::io::Cursor;
use tracing::{error, info};

use super::ClassService;
use crate::config::AppConfig;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::models::users::responses::ImportResult;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::validate::validate_username;

/// 导入行数据，line_num 为文件中的行号（1-based，含表头）
#[derive(Debug, Clone)]
struct ImportRow {
    line_num: usize,
    username: String,
    name: String,
    email: Option<String>,
}

pub async fn import_students(
    service: &ClassService,
    class_id: i64,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = AppConfig::get();

    // 目标班级必须存在
    match storage.get_class_by_id(class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "班级不存在",
            )));
        }
        Err(e) => {
            error!("Failed to get class {}: {}", class_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get class: {e}"),
                )),
            );
        }
    }

    // 读取上传的文件内容
    let file_bytes = match read_file_from_multipart(&mut payload).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                format!("文件读取失败: {e}"),
            )));
        }
    };

    if file_bytes.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileUploadFailed,
            "文件内容为空",
        )));
    }

    let (rows, parse_errors) = parse_csv(&file_bytes);

    if rows.is_empty() && parse_errors.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileInvalid,
            "文件中没有数据行",
        )));
    }

    if rows.len() > config.import.max_rows {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileInvalid,
            format!("单次导入最多支持 {} 行", config.import.max_rows),
        )));
    }

    // 所有导入账号共用默认密码，哈希一次即可
    let default_password = config.import.default_password.clone();
    let password_hash =
        match tokio::task::spawn_blocking(move || hash_password(&default_password)).await {
            Ok(Ok(hash)) => hash,
            Ok(Err(e)) => {
                error!("Failed to hash default password: {}", e);
                return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Password hashing failed: {e}"),
                )));
            }
            Err(e) => {
                error!("Password hashing task failed: {}", e);
                return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Password hashing failed: {e}"),
                )));
            }
        };

    let mut imported = 0usize;
    let mut errors: Vec<String> = parse_errors;

    for row in rows {
        // 必填字段检查
        if row.username.is_empty() || row.name.is_empty() {
            errors.push(format!("Line {}: missing required field", row.line_num));
            continue;
        }

        if let Err(msg) = validate_username(&row.username) {
            errors.push(format!("Line {}: {}", row.line_num, msg));
            continue;
        }

        let create_req = CreateUserRequest {
            username: row.username.clone(),
            password: None,
            role: UserRole::Student,
            name: row.name,
            email: row.email,
            class_id: Some(class_id),
        };

        match storage.create_user(create_req, &password_hash).await {
            Ok(_) => imported += 1,
            Err(e) if e.is_unique_violation() => {
                errors.push(format!(
                    "Line {}: username '{}' already exists",
                    row.line_num, row.username
                ));
            }
            Err(e) => {
                error!("Failed to import student {}: {}", row.username, e);
                errors.push(format!("Line {}: {}", row.line_num, e));
            }
        }
    }

    info!(
        "Imported {} students into class {} ({} errors)",
        imported,
        class_id,
        errors.len()
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ImportResult { imported, errors },
        "导入完成",
    )))
}

async fn read_file_from_multipart(payload: &mut Multipart) -> Result<Vec<u8>, String> {
    let mut file_bytes = Vec::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| format!("读取字段失败: {e}"))?;

        if field.name().map(|n| n == "file").unwrap_or(false) {
            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|e| format!("读取数据失败: {e}"))?;
                file_bytes.extend_from_slice(&data);
            }
        }
    }

    if file_bytes.is_empty() {
        return Err("未找到文件字段".to_string());
    }

    Ok(file_bytes)
}

/// 解析 CSV 内容
///
/// 列顺序固定为 username, name, email（email 可省略）。
/// 表头可有可无：首行包含 "username" 时视为表头并跳过。
/// 单行解析失败记为行级错误并继续，不中断整体导入。
fn parse_csv(data: &[u8]) -> (Vec<ImportRow>, Vec<String>) {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(data));

    let mut rows = Vec::new();
    let mut errors = Vec::new();

    for (idx, result) in rdr.records().enumerate() {
        let line_num = idx + 1;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                errors.push(format!("Line {line_num}: {e}"));
                continue;
            }
        };

        let username = record.get(0).unwrap_or("").trim().to_string();
        let name = record.get(1).unwrap_or("").trim().to_string();
        let email = record
            .get(2)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        // 表头行检测
        if idx == 0 && username.to_lowercase().contains("username") {
            continue;
        }

        // 完全空白的行直接跳过
        if username.is_empty() && name.is_empty() && email.is_none() {
            continue;
        }

        rows.push(ImportRow {
            line_num,
            username,
            name,
            email,
        });
    }

    (rows, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_with_header() {
        let data = b"username,name,email\nstu01,Zhang San,zs@example.com\nstu02,Li Si,\n";
        let (rows, errors) = parse_csv(data);
        assert!(errors.is_empty());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].username, "stu01");
        assert_eq!(rows[0].email.as_deref(), Some("zs@example.com"));
        assert_eq!(rows[1].username, "stu02");
        assert_eq!(rows[1].email, None);
        // 行号对应文件中的实际行
        assert_eq!(rows[0].line_num, 2);
    }

    #[test]
    fn test_parse_csv_without_header() {
        let data = b"stu01,Zhang San\nstu02,Li Si\n";
        let (rows, errors) = parse_csv(data);
        assert!(errors.is_empty());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line_num, 1);
        assert_eq!(rows[0].name, "Zhang San");
    }

    #[test]
    fn test_parse_csv_skips_blank_lines() {
        let data = b"stu01,Zhang San\n,,\nstu02,Li Si\n";
        let (rows, errors) = parse_csv(data);
        assert!(errors.is_empty());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].line_num, 3);
    }

    #[test]
    fn test_parse_csv_missing_name_column() {
        let data = b"stu01\n";
        let (rows, errors) = parse_csv(data);
        assert!(errors.is_empty());
        assert_eq!(rows.len(), 1);
        // 缺失字段在导入阶段报 missing required field
        assert!(rows[0].name.is_empty());
    }

    #[test]
    fn test_parse_csv_bad_row_does_not_abort() {
        // 第二行不是合法 UTF-8，记为行级错误，后续行照常解析
        let mut data: Vec<u8> = Vec::new();
        data.extend_from_slice(b"stu01,Zhang San\n");
        data.extend_from_slice(b"bad,\xff\xfe\n");
        data.extend_from_slice(b"stu02,Li Si\n");

        let (rows, errors) = parse_csv(&data);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Line 2:"));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].username, "stu01");
        assert_eq!(rows[1].username, "stu02");
        assert_eq!(rows[1].line_num, 3);
    }
}
