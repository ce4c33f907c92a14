use std::fs;
use std::path::Path;

fn main() {
    let dist = Path::new("frontend/dist");

    // rust-embed 在编译期要求目录存在，前端未构建时生成一个占位页面
    if !dist.exists() || !dist.join("index.html").exists() {
        fs::create_dir_all(dist).expect("Failed to create frontend/dist directory");
        fs::write(
            dist.join("index.html"),
            r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <title>问卷调研管理系统</title>
</head>
<body>
    <h1>问卷调研管理系统</h1>
    <p>前端尚未构建。请在 frontend/ 目录下运行构建命令后重新编译。</p>
</body>
</html>
"#,
        )
        .expect("Failed to write placeholder index.html");
    }

    println!("cargo:rerun-if-changed=frontend/dist");
}
