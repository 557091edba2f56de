mod helpers;
mod test_submit;
