//! 业务错误码
//!
//! 与 HTTP 状态码配合使用：HTTP 状态码表达大类，业务码表达细分原因，
//! 前端据此展示对应的提示文案。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 400x 请求参数问题
    BadRequest = 4000,
    UserNameInvalid = 4001,
    UserEmailInvalid = 4002,

    // 401x 认证失败
    Unauthorized = 4010,
    AuthFailed = 4011,

    // 403x 权限不足
    Forbidden = 4030,
    SubjectPermissionDenied = 4031,

    // 404x 资源不存在
    NotFound = 4040,
    UserNotFound = 4041,
    ClassNotFound = 4042,
    SubjectNotFound = 4043,
    QuestionNotFound = 4044,

    // 409x 冲突
    UserAlreadyExists = 4090,

    // 422x 导入数据问题
    ImportFileInvalid = 4220,
    FileUploadFailed = 4221,

    // 500x 服务端错误
    InternalServerError = 5000,
    UserCreationFailed = 5001,
    UserUpdateFailed = 5002,
    UserDeleteFailed = 5003,
    ClassCreationFailed = 5004,
    ClassUpdateFailed = 5005,
    ClassDeleteFailed = 5006,
    SubjectCreationFailed = 5007,
    SubjectUpdateFailed = 5008,
    SubjectDeleteFailed = 5009,
    QuestionCreationFailed = 5010,
    QuestionDeleteFailed = 5011,
}
